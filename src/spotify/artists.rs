use crate::{
    error::ApiError,
    spotify::SpotifyClient,
    types::{Album, Artist, ArtistTopTracks, Paged},
};

pub async fn get_artist(
    client: &SpotifyClient,
    user_id: &str,
    artist_id: &str,
) -> Result<Artist, ApiError> {
    let path = format!("/artists/{id}", id = urlencoding::encode(artist_id));
    client.execute(user_id, &path).await
}

pub async fn top_tracks(
    client: &SpotifyClient,
    user_id: &str,
    artist_id: &str,
) -> Result<ArtistTopTracks, ApiError> {
    let path = format!("/artists/{id}/top-tracks", id = urlencoding::encode(artist_id));
    client.execute(user_id, &path).await
}

/// Retrieves a page of an artist's albums.
///
/// # Arguments
///
/// * `limit` - Maximum number of albums to return
/// * `offset` - Index of the first album, for pagination
pub async fn albums(
    client: &SpotifyClient,
    user_id: &str,
    artist_id: &str,
    limit: u32,
    offset: u32,
) -> Result<Paged<Album>, ApiError> {
    let path = format!(
        "/artists/{id}/albums?limit={limit}&offset={offset}",
        id = urlencoding::encode(artist_id),
        limit = limit,
        offset = offset
    );
    client.execute(user_id, &path).await
}
