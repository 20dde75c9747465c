//! Configuration management for the Spotify backend-for-frontend.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Values are read once at startup into a [`Config`]
//! which is then handed to every component that needs it; nothing reads the
//! environment after that.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, io, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
const DEFAULT_SCOPE: &str = "user-read-private user-read-email user-top-read";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("failed to prepare config directory: {0}")]
    Io(#[from] io::Error),

    #[error("failed to load env file: {0}")]
    EnvFile(String),
}

/// Spotify application credentials and endpoint locations.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Space-delimited scope list requested at authorization.
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    /// Base URL every catalog path is appended to, without trailing slash.
    pub api_url: String,
}

/// Bounds for the rate-limit retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub default_delay_seconds: u64,
    pub max_delay_seconds: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            default_delay_seconds: 1,
            max_delay_seconds: 300,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub server_addr: String,
    /// Base URL of the frontend that login redirects land on.
    pub frontend_url: String,
    pub spotify: SpotifyConfig,
    pub retry: RetryConfig,
    /// Upper bound for any single upstream request.
    pub request_timeout: Duration,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Call [`load_env`] first so values from `.env` files are visible.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required variable is missing or a
    /// numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let spotify = SpotifyConfig {
            client_id: required(&get, "SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required(&get, "SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            redirect_uri: required(&get, "SPOTIFY_API_REDIRECT_URI")?,
            scope: get("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            auth_url: get("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: get("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: get("SPOTIFY_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        };

        let defaults = RetryConfig::default();
        let retry = RetryConfig {
            max_attempts: number(&get, "SPOTIFY_RETRY_MAX_ATTEMPTS", defaults.max_attempts)?,
            default_delay_seconds: number(
                &get,
                "SPOTIFY_RETRY_DEFAULT_DELAY_SECONDS",
                defaults.default_delay_seconds,
            )?,
            max_delay_seconds: number(
                &get,
                "SPOTIFY_RETRY_MAX_DELAY_SECONDS",
                defaults.max_delay_seconds,
            )?,
        };

        let timeout_seconds: u64 = number(&get, "SPOTIFY_REQUEST_TIMEOUT_SECONDS", 30)?;

        Ok(Self {
            server_addr: get("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
            frontend_url: get("FRONTEND_URL")
                .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            spotify,
            retry,
            request_timeout: Duration::from_secs(timeout_seconds),
        })
    }
}

fn required<F>(get: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    get(key).ok_or(ConfigError::Missing(key))
}

fn number<F, T>(get: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match get(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

/// Loads environment variables from `.env` files.
///
/// Reads `sporlgate/.env` in the platform-specific local data directory
/// (creating the directory if needed), then `.env` in the working directory.
/// Variables already set are never overridden, so the process environment
/// wins over the data-dir file, which wins over the working-dir file.
/// Missing files are skipped.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/sporlgate/.env`
/// - macOS: `~/Library/Application Support/sporlgate/.env`
/// - Windows: `%LOCALAPPDATA%/sporlgate/.env`
///
/// # Returns
///
/// The paths of the files that were loaded, in load order.
pub async fn load_env() -> Result<Vec<PathBuf>, ConfigError> {
    let data_dir_env = env_path();
    if let Some(parent) = data_dir_env.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    let working_dir_env = env::current_dir()?.join(".env");
    load_env_files(&[data_dir_env, working_dir_env])
}

fn load_env_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, ConfigError> {
    let mut loaded = Vec::new();
    for path in paths {
        if !path.is_file() || loaded.contains(path) {
            continue;
        }
        dotenv::from_path(path).map_err(|e| ConfigError::EnvFile(e.to_string()))?;
        loaded.push(path.clone());
    }
    Ok(loaded)
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporlgate/.env");
    path
}
