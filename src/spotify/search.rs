use crate::{error::ApiError, spotify::SpotifyClient, types::SearchResponse};

/// Searches the catalog.
///
/// # Arguments
///
/// * `query` - Free-text query, percent-encoded before it is sent
/// * `kinds` - Comma-separated item types, e.g. `artist,track`
/// * `limit` - Maximum results per item type
/// * `offset` - Index of the first result, for pagination
pub async fn search(
    client: &SpotifyClient,
    user_id: &str,
    query: &str,
    kinds: &str,
    limit: u32,
    offset: u32,
) -> Result<SearchResponse, ApiError> {
    client
        .execute(user_id, &search_path(query, kinds, limit, offset))
        .await
}

fn search_path(query: &str, kinds: &str, limit: u32, offset: u32) -> String {
    format!(
        "/search?q={q}&type={kinds}&limit={limit}&offset={offset}",
        q = urlencoding::encode(query),
        kinds = urlencoding::encode(kinds),
        limit = limit,
        offset = offset
    )
}
