use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{
    api::AuthUser,
    error::ApiError,
    server::AppState,
    spotify,
    types::{Album, Artist, ArtistTopTracks, Paged},
};

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

fn default_limit() -> u32 {
    20
}

pub async fn artist(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(artist_id): Path<String>,
) -> Result<Json<Artist>, ApiError> {
    spotify::artists::get_artist(&state.client, &user_id, &artist_id)
        .await
        .map(Json)
}

pub async fn artist_top_tracks(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(artist_id): Path<String>,
) -> Result<Json<ArtistTopTracks>, ApiError> {
    spotify::artists::top_tracks(&state.client, &user_id, &artist_id)
        .await
        .map(Json)
}

pub async fn artist_albums(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(artist_id): Path<String>,
    Query(page): Query<PageParams>,
) -> Result<Json<Paged<Album>>, ApiError> {
    spotify::artists::albums(&state.client, &user_id, &artist_id, page.limit, page.offset)
        .await
        .map(Json)
}
