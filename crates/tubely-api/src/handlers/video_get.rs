use crate::auth::AuthUser;
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::path::VideoIdPath;
use axum::{extract::State, Json};
use std::sync::Arc;
use tubely_core::models::Video;
use tubely_core::AppError;

#[tracing::instrument(skip_all, fields(video_id = %video_id, user_id = %user.user_id))]
pub async fn get_video(
    VideoIdPath(video_id): VideoIdPath,
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Video>, HttpAppError> {
    let video = state
        .db
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    Ok(Json(video))
}
