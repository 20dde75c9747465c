use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::AuthUser,
    error::ApiError,
    server::AppState,
    spotify,
    types::{Album, Paged, Track},
};

pub async fn album(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(album_id): Path<String>,
) -> Result<Json<Album>, ApiError> {
    spotify::albums::get_album(&state.client, &user_id, &album_id)
        .await
        .map(Json)
}

pub async fn album_tracks(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(album_id): Path<String>,
) -> Result<Json<Paged<Track>>, ApiError> {
    spotify::albums::tracks(&state.client, &user_id, &album_id)
        .await
        .map(Json)
}
