use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    api::AuthUser,
    error::ApiError,
    server::AppState,
    spotify,
    types::{Artist, Paged, Profile, Track},
};

#[derive(Debug, Deserialize)]
pub struct LimitParams {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    20
}

pub async fn profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Profile>, ApiError> {
    spotify::me::profile(&state.client, &user_id).await.map(Json)
}

pub async fn top_artists(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<LimitParams>,
) -> Result<Json<Paged<Artist>>, ApiError> {
    spotify::me::top_artists(&state.client, &user_id, params.limit)
        .await
        .map(Json)
}

pub async fn top_tracks(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<LimitParams>,
) -> Result<Json<Paged<Track>>, ApiError> {
    spotify::me::top_tracks(&state.client, &user_id, params.limit)
        .await
        .map(Json)
}
