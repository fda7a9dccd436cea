//! Video upload pipeline
//!
//! Stage the upload, remux it for fast start, classify it by the original's
//! aspect ratio, publish the remux, then point the record at it. Everything
//! staged lives in one directory that is removed when `staged` goes out of scope.

use axum::extract::Multipart;
use tubely_core::{asset_file_name, AppError, UrlField, Video};
use tubely_processing::VideoCategory;
use uuid::Uuid;

use crate::auth::guard::authorize_owner;
use crate::auth::models::Principal;
use crate::constants::{STAGED_VIDEO_NAME, VIDEO_FIELD};
use crate::services::record_updater::{update_record_url, Compensation};
use crate::state::AppState;
use crate::utils::upload::stage_part;

pub async fn upload_video(
    state: &AppState,
    video_id: Uuid,
    principal: &Principal,
    multipart: &mut Multipart,
) -> Result<Video, AppError> {
    authorize_owner(state.videos.as_ref(), video_id, principal).await?;

    let media = &state.media;
    let (media_type, staged) = stage_part(
        multipart,
        VIDEO_FIELD,
        &media.staging,
        STAGED_VIDEO_NAME,
        media.limits.video_max_bytes,
        |media_type| {
            if media_type.is_mp4() {
                Ok(())
            } else {
                Err(AppError::UnsupportedMediaType(media_type.to_string()))
            }
        },
    )
    .await?;

    tracing::info!(
        video_id = %video_id,
        size_bytes = staged.len(),
        "Video staged"
    );

    let processed = media.toolkit.normalize(staged.path()).await?;
    let aspect_ratio = media.toolkit.inspect(staged.path()).await?;
    let category = VideoCategory::from_aspect_ratio(aspect_ratio.as_str());
    let key = category.storage_key(&asset_file_name(&media_type));

    let data = staged.read_derivative(&processed).await?;
    let size_bytes = data.len();
    let url = media
        .publisher
        .put_object(&key, data, media_type.essence())
        .await?;

    tracing::info!(
        video_id = %video_id,
        key = %key,
        aspect_ratio = %aspect_ratio,
        category = %category,
        size_bytes,
        "Video published"
    );

    update_record_url(
        state.videos.as_ref(),
        video_id,
        principal,
        UrlField::Video,
        url,
        vec![Compensation::DeleteStored {
            storage: media.publisher.clone(),
            key,
        }],
    )
    .await
}
