use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Router,
    routing::{delete, get},
};
use reqwest::Client;
use tracing::info;

use crate::{
    Res, api,
    config::Config,
    management::CredentialStore,
    spotify::{OAuthService, RetryPolicy, SpotifyClient},
};

/// Shared state handed to every handler.
///
/// All members are cheap to clone and share the same credential store.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: CredentialStore,
    pub oauth: OAuthService,
    pub client: SpotifyClient,
}

impl AppState {
    /// Wires the store, OAuth gateway and request executor together.
    ///
    /// A single HTTP client with the configured timeout is shared by all
    /// upstream calls.
    pub fn new(config: Config) -> Res<Self> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        let store = CredentialStore::new();
        let retry = RetryPolicy::new(config.retry);
        let spotify = Arc::new(config.spotify.clone());

        let oauth = OAuthService::new(spotify.clone(), store.clone(), retry, http.clone());
        let client = SpotifyClient::new(
            http,
            spotify.api_url.clone(),
            store.clone(),
            oauth.clone(),
            retry,
        );

        Ok(Self {
            config: Arc::new(config),
            store,
            oauth,
            client,
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/auth/spotify", get(api::login))
        .route("/auth/spotify/callback", get(api::callback))
        .route("/api/auth/logout", delete(api::logout))
        .route("/api/me/profile", get(api::profile))
        .route("/api/me/top/artists", get(api::top_artists))
        .route("/api/me/top/tracks", get(api::top_tracks))
        .route("/api/artists/{id}", get(api::artist))
        .route("/api/artists/{id}/albums", get(api::artist_albums))
        .route("/api/artists/{id}/top-tracks", get(api::artist_top_tracks))
        .route("/api/albums/{id}", get(api::album))
        .route("/api/albums/{id}/tracks", get(api::album_tracks))
        .route("/api/tracks/{id}", get(api::track))
        .route("/api/search", get(api::search))
        .with_state(state)
}

pub async fn start_api_server(config: Config) -> Res<()> {
    let addr = SocketAddr::from_str(&config.server_addr)
        .map_err(|e| format!("Failed to parse server address {}: {}", config.server_addr, e))?;

    let app = router(AppState::new(config)?);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
