use crate::error::RenderedError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

/// Error detail configuration
#[derive(Clone, Copy, Debug)]
pub struct ErrorDetailsConfig {
    pub is_production: bool,
}

/// Error details middleware
/// In production, re-renders error responses without `details` and `error_type`.
pub async fn error_details_middleware(
    State(config): State<ErrorDetailsConfig>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(RenderedError(rendered)) = response.extensions_mut().remove::<RenderedError>() else {
        return response;
    };

    if !config.is_production || (rendered.details.is_none() && rendered.error_type.is_none()) {
        return response;
    }

    let status = response.status();
    (status, Json(rendered.redacted())).into_response()
}
