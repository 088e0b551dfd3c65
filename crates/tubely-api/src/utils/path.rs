use crate::error::HttpAppError;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use tubely_core::AppError;
use uuid::Uuid;

/// `{video_id}` path parameter parsed as a UUID.
///
/// Rejects with 400 "Invalid ID". Place it before `AuthUser` in handler
/// arguments so a malformed id is reported ahead of authentication.
#[derive(Debug, Clone, Copy)]
pub struct VideoIdPath(pub Uuid);

impl<S> FromRequestParts<S> for VideoIdPath
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::InvalidRequest("Invalid ID".to_string()))?;

        let id = Uuid::parse_str(&raw)
            .map_err(|_| AppError::InvalidRequest("Invalid ID".to_string()))?;

        Ok(VideoIdPath(id))
    }
}
