//! Thumbnail upload: asset root + in-process cache, then the record.

use axum::extract::Multipart;
use tubely_core::{asset_file_name, AppError, UrlField, Video};
use uuid::Uuid;

use crate::auth::guard::authorize_owner;
use crate::auth::models::Principal;
use crate::constants::THUMBNAIL_FIELD;
use crate::services::record_updater::{update_record_url, Compensation};
use crate::services::thumbnail_cache::CachedThumbnail;
use crate::state::AppState;
use crate::utils::upload::read_part;

pub async fn upload_thumbnail(
    state: &AppState,
    video_id: Uuid,
    principal: &Principal,
    multipart: &mut Multipart,
) -> Result<Video, AppError> {
    authorize_owner(state.videos.as_ref(), video_id, principal).await?;

    let media = &state.media;
    let part = read_part(multipart, THUMBNAIL_FIELD, media.limits.thumbnail_max_bytes).await?;

    let key = asset_file_name(&part.media_type);
    let url = media
        .assets
        .put_object(&key, part.data.clone(), part.media_type.essence())
        .await?;

    let ticket = media
        .thumbnails
        .insert(
            video_id,
            CachedThumbnail {
                data: part.data,
                media_type: part.content_type,
            },
        )
        .await;

    tracing::info!(
        video_id = %video_id,
        key = %key,
        media_type = %part.media_type,
        "Thumbnail stored"
    );

    update_record_url(
        state.videos.as_ref(),
        video_id,
        principal,
        UrlField::Thumbnail,
        url,
        vec![
            Compensation::RollbackThumbnail {
                cache: media.thumbnails.clone(),
                ticket,
            },
            Compensation::DeleteStored {
                storage: media.assets.clone(),
                key,
            },
        ],
    )
    .await
}
