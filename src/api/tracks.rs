use axum::{
    Json,
    extract::{Path, State},
};

use crate::{api::AuthUser, error::ApiError, server::AppState, spotify, types::Track};

pub async fn track(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(track_id): Path<String>,
) -> Result<Json<Track>, ApiError> {
    spotify::tracks::get_track(&state.client, &user_id, &track_id)
        .await
        .map(Json)
}
