//! Spotify Backend-for-Frontend Library
//!
//! This library signs end users in with Spotify through the OAuth 2.0
//! authorization-code flow, keeps their credentials in memory keyed by an
//! opaque session identifier, and forwards catalog queries (profile, artists,
//! albums, tracks, search) to the Spotify Web API on their behalf.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the inbound surface
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared by every layer
//! - `logging` - Tracing subscriber setup
//! - `management` - In-memory credential storage
//! - `server` - Router assembly and the HTTP listener
//! - `spotify` - Spotify Web API client, OAuth gateway and retry policy
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use sporlgate::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> sporlgate::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     server::start_api_server(config).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for startup and CLI operations.
///
/// Request handling uses [`error::ApiError`]; this alias covers the places
/// where any error is fatal anyway, such as binding the listener or building
/// the HTTP client.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
