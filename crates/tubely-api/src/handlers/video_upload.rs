use crate::auth::guard::parse_video_id;
use crate::auth::models::Principal;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::video_pipeline;
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
    path = "/videos/{video_id}/video",
    tag = "videos",
    params(
        ("video_id" = String, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Form field `video`: an mp4 file"),
    responses(
        (status = 200, description = "Video published, updated video record", body = Video),
        (status = 400, description = "Invalid ID, upload, or not an mp4", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credential, or not the owner", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Processing or storage failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    principal: Principal,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;
    reject_oversized_body(&headers, state.media.limits.video_max_bytes)?;
    let mut multipart = multipart?;

    tracing::debug!(video_id = %video_id, user_id = %principal.user_id, "Uploading video");

    let video =
        video_pipeline::upload_video(&state, video_id, &principal, &mut multipart).await?;
    Ok(Json(video))
}
