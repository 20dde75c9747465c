use crate::{
    error::ApiError,
    spotify::SpotifyClient,
    types::{Artist, Paged, Profile, Track},
};

/// Retrieves the signed-in user's profile (`GET /me`).
pub async fn profile(client: &SpotifyClient, user_id: &str) -> Result<Profile, ApiError> {
    client.execute(user_id, "/me").await
}

/// Retrieves the user's most listened artists.
///
/// # Arguments
///
/// * `limit` - Maximum number of artists to return (Spotify accepts 1-50)
pub async fn top_artists(
    client: &SpotifyClient,
    user_id: &str,
    limit: u32,
) -> Result<Paged<Artist>, ApiError> {
    let path = format!("/me/top/artists?limit={limit}", limit = limit);
    client.execute(user_id, &path).await
}

/// Retrieves the user's most listened tracks.
pub async fn top_tracks(
    client: &SpotifyClient,
    user_id: &str,
    limit: u32,
) -> Result<Paged<Track>, ApiError> {
    let path = format!("/me/top/tracks?limit={limit}", limit = limit);
    client.execute(user_id, &path).await
}
