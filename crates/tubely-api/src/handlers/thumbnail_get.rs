use crate::auth::guard::parse_video_id;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tubely_core::AppError;

#[utoipa::path(
    get,
    path = "/thumbnails/{video_id}",
    tag = "thumbnails",
    params(
        ("video_id" = String, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Thumbnail bytes with their uploaded content type"),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 404, description = "No thumbnail cached for this video", body = ErrorResponse)
    )
)]
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> Result<Response, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;
    let thumbnail = state
        .media
        .thumbnails
        .get(video_id)
        .await
        .ok_or_else(|| AppError::ThumbnailNotFound(video_id.to_string()))?;

    let content_type = HeaderValue::from_str(&thumbnail.media_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    Ok(([(header::CONTENT_TYPE, content_type)], thumbnail.data).into_response())
}
