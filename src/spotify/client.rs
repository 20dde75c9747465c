use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::{
    error::ApiError, management::CredentialStore, spotify::auth::OAuthService,
    spotify::retry::RetryPolicy,
};

/// Executes catalog calls against the Spotify Web API on behalf of a user.
///
/// Resolves the user's access token from the [`CredentialStore`], issues the
/// call, and applies two recovery policies:
///
/// - **401 Unauthorized**: one transparent refresh through [`OAuthService`]
///   followed by exactly one replay with the new token. Never loops.
/// - **429 Too Many Requests**: bounded, `Retry-After`-directed backoff with the
///   same token, see [`RetryPolicy`].
///
/// Everything else is reported to the caller as an [`ApiError`].
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    store: CredentialStore,
    oauth: OAuthService,
    retry: RetryPolicy,
}

impl SpotifyClient {
    pub fn new(
        http: Client,
        api_url: impl Into<String>,
        store: CredentialStore,
        oauth: OAuthService,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            store,
            oauth,
            retry,
        }
    }

    /// Fetches `path` (relative to the API base URL) for `user_id` and
    /// decodes the body into `T`.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Session identity minted at login
    /// * `path` - Upstream path including any query string, e.g. `/me/top/artists?limit=20`
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] without any network call if the user has no
    ///   credential or a blank access token; also when the refresh fails or the
    ///   replay after a refresh is rejected again
    /// - [`ApiError::RateLimited`] when the retry budget is spent on 429s
    /// - [`ApiError::Upstream`] for any other non-success status, without retry
    /// - [`ApiError::Internal`] for transport or decoding failures
    ///
    /// # Example
    ///
    /// ```
    /// let profile: Profile = client.execute(&user_id, "/me").await?;
    /// ```
    pub async fn execute<T>(&self, user_id: &str, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let Some(token) = self.access_token(user_id).await else {
            debug!(user_id, "no usable credential");
            return Err(ApiError::Unauthorized);
        };

        match self.attempt(path, &token).await {
            Err(ApiError::Unauthorized) => {
                if !self.oauth.refresh(user_id).await {
                    info!(user_id, "refresh failed, session needs re-authentication");
                    return Err(ApiError::Unauthorized);
                }

                match self.access_token(user_id).await {
                    Some(refreshed) if refreshed != token => self.attempt(path, &refreshed).await,
                    _ => Err(ApiError::Unauthorized),
                }
            }
            outcome => outcome,
        }
    }

    async fn access_token(&self, user_id: &str) -> Option<String> {
        self.store
            .get(user_id)
            .await
            .filter(|credential| credential.has_access_token())
            .map(|credential| credential.access_token)
    }

    async fn attempt<T>(&self, path: &str, token: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .retry
            .send(path, || self.http.get(&url).bearer_auth(token))
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            status if status.is_success() => response.json::<T>().await.map_err(|e| {
                error!(path, error = %e, "failed to decode upstream response");
                ApiError::Internal(e.to_string())
            }),
            status => {
                debug!(path, status = status.as_u16(), "upstream error status");
                Err(ApiError::Upstream(status))
            }
        }
    }
}
