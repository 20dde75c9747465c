//! # Spotify Integration Module
//!
//! This module is the integration layer between the inbound HTTP surface and
//! Spotify's services. It owns all outbound HTTP communication: the OAuth
//! authorization-code flow against the accounts service and authenticated
//! catalog calls against the Web API.
//!
//! ## Architecture
//!
//! ```text
//! Inbound handlers (api)
//!          ↓
//! Resource wrappers (me, artists, albums, tracks, search)
//!          ↓
//! SpotifyClient ──401──→ OAuthService::refresh
//!          ↓                   ↓
//!     RetryPolicy (429 backoff, shared)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API / Accounts service
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - Authorization URL, code exchange, refresh and logout
//! - [`client`] - The request executor every catalog call goes through
//! - [`retry`] - Bounded, `Retry-After`-directed backoff on 429
//!
//! The resource modules only build upstream paths and name the response type;
//! all failure handling lives in [`client`] and [`retry`].
//!
//! ## Error Handling
//!
//! ### Authorization
//! - A missing credential or blank access token fails with `Unauthorized`
//!   before any network call
//! - A 401 triggers exactly one refresh and, if the token changed, exactly one
//!   replay; the replay's outcome is final
//! - Refresh failures are reported as `false`, never as errors
//!
//! ### Rate Limiting
//! - 429 responses are retried with the same token after the delay named by
//!   `Retry-After`, clamped to the configured ceiling
//! - Missing or malformed `Retry-After` falls back to the configured default
//! - The attempt budget is per logical call; a refresh's own token request has
//!   a separate budget
//!
//! ### Everything Else
//! - Other upstream statuses are passed through without retry
//! - Transport failures, timeouts and undecodable bodies become `Internal`
//!
//! ## Token Lifetime
//!
//! Expiry is never checked proactively. `expires_in` is stored for reference
//! only and a stale token is discovered when Spotify rejects it.

pub mod albums;
pub mod artists;
pub mod auth;
pub mod client;
pub mod me;
pub mod retry;
pub mod search;
pub mod tracks;

pub use auth::OAuthService;
pub use client::SpotifyClient;
pub use retry::RetryPolicy;
