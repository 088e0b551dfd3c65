//! Thumbnail upload handler.
//!
//! The owner of a video uploads an image as multipart field `thumbnail`. The
//! bytes are written to the assets directory under a random name and the
//! video record is pointed at the new file.

use crate::auth::AuthUser;
use crate::constants::THUMBNAIL_FIELD;
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::asset_name::{asset_url, generate_asset_filename};
use crate::utils::path::VideoIdPath;
use crate::utils::upload::{extract_multipart_file, validate_signature, validate_thumbnail_type};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use std::sync::Arc;
use tubely_core::models::Video;
use tubely_core::AppError;

/// Upload a thumbnail for a video.
///
/// Path and token errors are reported before any error in the body.
#[tracing::instrument(
    skip_all,
    fields(video_id = %video_id, user_id = %user.user_id, operation = "upload_thumbnail")
)]
pub async fn upload_thumbnail(
    VideoIdPath(video_id): VideoIdPath,
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, HttpAppError> {
    tracing::debug!("Uploading thumbnail");

    let multipart = multipart.map_err(|e| {
        AppError::InvalidRequest(format!("Couldn't parse multipart form: {}", e.body_text()))
    })?;
    let upload = extract_multipart_file(multipart, THUMBNAIL_FIELD).await?;

    let kind = validate_thumbnail_type(upload.content_type.as_deref())?;
    if state.media.verify_signature {
        validate_signature(kind, upload.head())?;
    }

    let mut video = state
        .db
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    if !video.is_owned_by(user.user_id) {
        return Err(AppError::Unauthorized("User is not the video owner".to_string()).into());
    }

    let filename = generate_asset_filename(kind)?;
    let size_bytes = upload.size_bytes;
    let reader = upload.into_reader().await.map_err(AppError::from)?;
    let stored = state
        .media
        .assets
        .put(&filename, kind.mime_type(), reader)
        .await?;

    video.set_thumbnail_url(asset_url(&state.media.public_base_url, &stored.key));

    if let Err(e) = state.db.videos.update_video(&video).await {
        // The record never referenced the file; don't leave it behind.
        if let Err(cleanup_err) = state.media.assets.delete(&stored.key).await {
            tracing::warn!(
                error = %cleanup_err,
                key = %stored.key,
                "Failed to remove thumbnail after update failure"
            );
        }
        return Err(e.into());
    }

    tracing::info!(
        key = %stored.key,
        content_type = kind.mime_type(),
        size_bytes,
        "Thumbnail uploaded"
    );

    Ok(Json(video))
}
