use axum::{
    extract::{Query, State},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::warn;

use crate::{api::AuthUser, error::ApiError, server::AppState};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Sends the browser to Spotify's consent page.
pub async fn login(State(state): State<AppState>) -> Response {
    found(state.oauth.authorization_url())
}

/// Completes the authorization-code flow and hands the new session id to the frontend.
///
/// Redirects to `<frontend>/auth/callback?user_id=<id>` on success and to
/// `<frontend>/login?error=<message>` when Spotify reported an error, the code
/// is missing, or the exchange failed.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Response {
    let frontend = &state.config.frontend_url;

    if let Some(error) = params.error {
        warn!(%error, "authorization denied upstream");
        return found(error_redirect_url(frontend, &error));
    }

    let Some(code) = params.code else {
        return found(error_redirect_url(frontend, "missing authorization code"));
    };

    match state.oauth.exchange_code(&code).await {
        Ok(user_id) => found(success_redirect_url(frontend, &user_id)),
        Err(e) => {
            warn!(error = %e, "token exchange failed");
            found(error_redirect_url(frontend, exchange_failure_message(&e)))
        }
    }
}

pub async fn logout(State(state): State<AppState>, AuthUser(user_id): AuthUser) -> StatusCode {
    state.oauth.logout(&user_id).await;
    StatusCode::NO_CONTENT
}

fn found(location: String) -> Response {
    (StatusCode::FOUND, [(LOCATION, location)]).into_response()
}

pub fn success_redirect_url(frontend_url: &str, user_id: &str) -> String {
    format!(
        "{}/auth/callback?user_id={}",
        frontend_url,
        urlencoding::encode(user_id)
    )
}

/// Browser-facing reason for a failed exchange. Details stay in the logs.
fn exchange_failure_message(error: &ApiError) -> &'static str {
    match error {
        ApiError::InvalidArgument(_) => "missing authorization code",
        ApiError::RateLimited => "spotify is busy, try again later",
        _ => "token exchange failed",
    }
}

pub fn error_redirect_url(frontend_url: &str, message: &str) -> String {
    format!("{}/login?error={}", frontend_url, urlencoding::encode(message))
}
