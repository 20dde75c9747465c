use base64::{Engine, engine::general_purpose::STANDARD};
use uuid::Uuid;

/// Mints a fresh opaque user identity.
///
/// Not derived from the upstream account; every successful login gets a new one.
pub fn generate_user_id() -> String {
    Uuid::new_v4().to_string()
}

/// Extracts the user identity from an `Authorization: Bearer <id>` header value.
pub fn extract_user_id(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

/// `Authorization` header value for HTTP Basic client authentication.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let raw = format!("{}:{}", client_id, client_secret);
    format!("Basic {}", STANDARD.encode(raw))
}
