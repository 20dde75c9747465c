use crate::{error::ApiError, spotify::SpotifyClient, types::Track};

pub async fn get_track(
    client: &SpotifyClient,
    user_id: &str,
    track_id: &str,
) -> Result<Track, ApiError> {
    let path = format!("/tracks/{id}", id = urlencoding::encode(track_id));
    client.execute(user_id, &path).await
}
