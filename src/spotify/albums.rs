use crate::{
    error::ApiError,
    spotify::SpotifyClient,
    types::{Album, Paged, Track},
};

pub async fn get_album(
    client: &SpotifyClient,
    user_id: &str,
    album_id: &str,
) -> Result<Album, ApiError> {
    let path = format!("/albums/{id}", id = urlencoding::encode(album_id));
    client.execute(user_id, &path).await
}

pub async fn tracks(
    client: &SpotifyClient,
    user_id: &str,
    album_id: &str,
) -> Result<Paged<Track>, ApiError> {
    let path = format!("/albums/{id}/tracks", id = urlencoding::encode(album_id));
    client.execute(user_id, &path).await
}
