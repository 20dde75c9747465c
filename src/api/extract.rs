use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::ApiError, utils};

/// The caller's user identity, taken from `Authorization: Bearer <userId>`.
///
/// Rejects with 401 when the header is missing or not a bearer value. Whether
/// the identity has a stored credential is decided later by the executor.
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        utils::extract_user_id(header)
            .map(|id| AuthUser(id.to_string()))
            .ok_or(ApiError::Unauthorized)
    }
}
