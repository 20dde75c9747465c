//! # API Module
//!
//! HTTP handlers for the inbound surface the frontend talks to.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - `GET /auth/spotify`, redirects to Spotify's consent page
//! - [`callback`] - `GET /auth/spotify/callback`, exchanges the code and
//!   redirects to the frontend with the new session id
//! - [`logout`] - `DELETE /api/auth/logout`, forgets the caller's credential
//!
//! ### Catalog
//!
//! All catalog endpoints expect `Authorization: Bearer <userId>` and return
//! Spotify's payload as JSON, or the error status from [`crate::error::ApiError`].
//!
//! - [`profile`], [`top_artists`], [`top_tracks`] - `/api/me/...`
//! - [`artist`], [`artist_albums`], [`artist_top_tracks`] - `/api/artists/{id}/...`
//! - [`album`], [`album_tracks`] - `/api/albums/{id}/...`
//! - [`track`] - `/api/tracks/{id}`
//! - [`search`] - `/api/search`
//!
//! ### Monitoring
//!
//! - [`health`] - status and version for monitoring systems and load balancers

mod albums;
mod artists;
mod auth;
mod extract;
mod health;
mod me;
mod search;
mod tracks;

pub use albums::{album, album_tracks};
pub use artists::{artist, artist_albums, artist_top_tracks};
pub use auth::{callback, error_redirect_url, login, logout, success_redirect_url};
pub use extract::AuthUser;
pub use health::health;
pub use me::{profile, top_artists, top_tracks};
pub use search::search;
pub use tracks::track;
