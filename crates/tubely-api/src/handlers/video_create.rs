use crate::auth::AuthUser;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use std::sync::Arc;
use tubely_core::models::Video;
use tubely_core::AppError;

#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Create a video owned by the caller. The record starts without a thumbnail.
#[tracing::instrument(skip_all, fields(user_id = %user.user_id, operation = "create_video"))]
pub async fn create_video(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateVideoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Video>), HttpAppError> {
    let Json(request) = body.map_err(|e| {
        AppError::InvalidRequest(format!("Couldn't decode request body: {}", e.body_text()))
    })?;

    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidRequest("Title is required".to_string()).into());
    }

    let video = Video::new(user.user_id, title, request.description);
    let created = state.db.videos.create_video(&video).await?;

    tracing::info!(video_id = %created.id, "Video created");

    Ok((StatusCode::CREATED, Json(created)))
}
