use crate::auth::guard::parse_video_id;
use crate::auth::models::Principal;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::thumbnail_pipeline;
use crate::state::AppState;
use crate::utils::upload::reject_oversized_body;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;
use tubely_core::Video;

#[utoipa::path(
    post,
    path = "/videos/{video_id}/thumbnail",
    tag = "videos",
    params(
        ("video_id" = String, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Form field `thumbnail`: the image file"),
    responses(
        (status = 200, description = "Thumbnail stored, updated video record", body = Video),
        (status = 400, description = "Invalid ID or upload", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credential, or not the owner", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    principal: Principal,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;
    reject_oversized_body(&headers, state.media.limits.thumbnail_max_bytes)?;
    let mut multipart = multipart?;

    tracing::debug!(video_id = %video_id, user_id = %principal.user_id, "Uploading thumbnail");

    let video =
        thumbnail_pipeline::upload_thumbnail(&state, video_id, &principal, &mut multipart).await?;
    Ok(Json(video))
}
