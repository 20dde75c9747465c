use std::sync::Arc;

use reqwest::{Client, StatusCode, header::AUTHORIZATION};
use tracing::{debug, info, warn};

use crate::{
    config::SpotifyConfig,
    error::ApiError,
    management::CredentialStore,
    spotify::retry::RetryPolicy,
    types::TokenResponse,
    utils,
};

/// Builds the URL users are redirected to in order to grant access.
///
/// Pure string construction: client id, response type `code`, and the
/// percent-encoded redirect URI and scope list.
///
/// # Example
///
/// ```
/// let url = authorization_url(&config.spotify);
/// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&redirect_uri=...&scope=...
/// ```
pub fn authorization_url(config: &SpotifyConfig) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}",
        auth_url = config.auth_url,
        client_id = urlencoding::encode(&config.client_id),
        redirect_uri = urlencoding::encode(&config.redirect_uri),
        scope = urlencoding::encode(&config.scope),
    )
}

/// The three OAuth operations against Spotify's accounts service.
///
/// Owns no state of its own beyond configuration; credentials go through the
/// shared [`CredentialStore`]. Calls to the token endpoint use the same
/// rate-limit retry policy as catalog calls, with their own attempt budget.
#[derive(Debug, Clone)]
pub struct OAuthService {
    config: Arc<SpotifyConfig>,
    store: CredentialStore,
    retry: RetryPolicy,
    http: Client,
}

impl OAuthService {
    pub fn new(
        config: Arc<SpotifyConfig>,
        store: CredentialStore,
        retry: RetryPolicy,
        http: Client,
    ) -> Self {
        Self {
            config,
            store,
            retry,
            http,
        }
    }

    pub fn authorization_url(&self) -> String {
        authorization_url(&self.config)
    }

    /// Exchanges an authorization code for a credential and opens a session.
    ///
    /// On success a brand-new user identity is minted, the credential is
    /// stored under it and the identity is returned.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidArgument`] for an empty code
    /// - [`ApiError::UpstreamProtocol`] if the token endpoint does not hand out a usable credential
    /// - [`ApiError::RateLimited`] if the token endpoint kept answering 429
    /// - [`ApiError::Internal`] on transport failures
    pub async fn exchange_code(&self, code: &str) -> Result<String, ApiError> {
        if code.trim().is_empty() {
            return Err(ApiError::InvalidArgument(
                "authorization code must not be empty".to_string(),
            ));
        }

        let response = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .await?;

        let credential = response.into_credential(None).ok_or_else(|| {
            ApiError::UpstreamProtocol("token response carried no access token".to_string())
        })?;

        let user_id = utils::generate_user_id();
        self.store.save(&user_id, credential).await?;
        info!(user_id = %user_id, "new session created");

        Ok(user_id)
    }

    /// Refreshes the stored credential for `user_id`.
    ///
    /// Returns `false` without contacting Spotify if there is no credential or
    /// it has no refresh token. When Spotify omits a new refresh token, the
    /// previous one is kept. The new credential is only stored if the entry
    /// still holds the credential the refresh started from, so a logout while
    /// the token request is pending wins.
    ///
    /// Never fails: any malformed response, exhausted retry budget, transport
    /// error or lost race is reported as `false`.
    pub async fn refresh(&self, user_id: &str) -> bool {
        let Some(current) = self.store.get(user_id).await else {
            debug!(user_id, "no credential to refresh");
            return false;
        };

        let Some(refresh_token) = current.refresh_token() else {
            debug!(user_id, "credential has no refresh token");
            return false;
        };

        let response = match self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(user_id, error = %e, "token refresh failed");
                return false;
            }
        };

        let Some(credential) = response.into_credential(current.refresh_token.clone()) else {
            warn!(user_id, "refresh response carried no access token");
            return false;
        };

        if self
            .store
            .replace_if_current(user_id, &current, credential)
            .await
        {
            debug!(user_id, "credential refreshed");
            true
        } else {
            info!(user_id, "credential changed or removed during refresh, discarding");
            false
        }
    }

    pub async fn logout(&self, user_id: &str) {
        self.store.remove(user_id).await;
        info!(user_id, "session closed");
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse, ApiError> {
        let basic = utils::basic_auth_header(&self.config.client_id, &self.config.client_secret);

        let response = self
            .retry
            .send(&self.config.token_url, || {
                self.http
                    .post(&self.config.token_url)
                    .header(AUTHORIZATION, basic.as_str())
                    .form(form)
            })
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UpstreamProtocol(format!(
                "token endpoint returned {}",
                status_label(status)
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| ApiError::UpstreamProtocol(format!("unreadable token response: {}", e)))
    }
}

fn status_label(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
