use tubely_core::{AppError, Video};
use tubely_db::VideoRepository;
use uuid::Uuid;

use crate::auth::models::Principal;

/// Path segment to a video id.
pub fn parse_video_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|e| AppError::InvalidIdentifier(format!("'{}' is not a video id: {}", raw, e)))
}

/// Fetch the record and confirm `principal` owns it.
pub async fn authorize_owner(
    videos: &dyn VideoRepository,
    video_id: Uuid,
    principal: &Principal,
) -> Result<Video, AppError> {
    let video = videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::RecordNotFound(video_id.to_string()))?;

    if !video.is_owned_by(principal.user_id) {
        tracing::warn!(
            video_id = %video_id,
            user_id = %principal.user_id,
            owner_id = %video.user_id,
            "Ownership check failed"
        );
        return Err(AppError::NotAuthorized(format!(
            "user {} does not own video {}",
            principal.user_id, video_id
        )));
    }

    Ok(video)
}
