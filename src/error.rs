//! Error taxonomy for upstream calls and the inbound HTTP surface.
//!
//! Every failure a caller of the request executor can observe is one of the
//! [`ApiError`] variants. Authorization failures and rate limiting are
//! recovered locally up to their bounds and only show up here once those
//! bounds are exceeded.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A caller broke an argument contract, e.g. saving under an empty user id.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No credential, a blank access token, a failed refresh, or a second
    /// rejection after refreshing.
    #[error("unauthorized")]
    Unauthorized,

    /// The upstream kept answering 429 until the retry budget ran out.
    #[error("rate limited by upstream")]
    RateLimited,

    /// The token endpoint answered but did not hand out a usable credential.
    #[error("upstream protocol error: {0}")]
    UpstreamProtocol(String),

    /// Transport or decoding failure with no recovery policy.
    #[error("internal error: {0}")]
    Internal(String),

    /// Any other upstream status, passed through verbatim.
    #[error("upstream returned {0}")]
    Upstream(StatusCode),
}

impl ApiError {
    /// The HTTP status this error is reported with on the inbound surface.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::UpstreamProtocol(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream(status) => *status,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}
