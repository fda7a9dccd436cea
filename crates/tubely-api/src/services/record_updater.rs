//! Final write of an upload: re-read the record, re-check ownership, set the URL.
//!
//! Side effects already performed by the pipeline are passed in as
//! [`Compensation`]s: confirmed once the record is written, undone if anything
//! here fails.

use std::sync::Arc;
use tubely_core::{AppError, UrlField, Video};
use tubely_db::VideoRepository;
use tubely_storage::Storage;
use uuid::Uuid;

use crate::auth::guard::authorize_owner;
use crate::auth::models::Principal;
use crate::services::thumbnail_cache::{CacheTicket, ThumbnailCache};

/// Undo step for a side effect that must not outlive a failed record update.
pub enum Compensation {
    RollbackThumbnail {
        cache: ThumbnailCache,
        ticket: CacheTicket,
    },
    DeleteStored {
        storage: Arc<dyn Storage>,
        key: String,
    },
}

impl Compensation {
    async fn confirm(self) {
        if let Compensation::RollbackThumbnail { cache, ticket } = self {
            if !cache.commit(&ticket).await {
                tracing::debug!(
                    video_id = %ticket.video_id(),
                    "Newer thumbnail already committed"
                );
            }
        }
    }

    async fn run(self) {
        match self {
            Compensation::RollbackThumbnail { cache, ticket } => {
                let video_id = ticket.video_id();
                if !cache.rollback(&ticket).await {
                    tracing::debug!(
                        video_id = %video_id,
                        "Thumbnail cache entry superseded, rollback skipped"
                    );
                }
            }
            Compensation::DeleteStored { storage, key } => {
                if let Err(e) = storage.delete(&key).await {
                    tracing::warn!(key = %key, error = %e, "Compensating delete failed");
                }
            }
        }
    }
}

/// Point `field` of the record at `url`, or run `compensations` and fail.
pub async fn update_record_url(
    videos: &dyn VideoRepository,
    video_id: Uuid,
    principal: &Principal,
    field: UrlField,
    url: String,
    compensations: Vec<Compensation>,
) -> Result<Video, AppError> {
    match write_url(videos, video_id, principal, field, url).await {
        Ok(video) => {
            for compensation in compensations {
                compensation.confirm().await;
            }
            Ok(video)
        }
        Err(err) => {
            tracing::warn!(
                video_id = %video_id,
                field = %field,
                error = %err,
                compensations = compensations.len(),
                "Record update failed, compensating"
            );
            for compensation in compensations {
                compensation.run().await;
            }
            Err(err)
        }
    }
}

async fn write_url(
    videos: &dyn VideoRepository,
    video_id: Uuid,
    principal: &Principal,
    field: UrlField,
    url: String,
) -> Result<Video, AppError> {
    let mut video = authorize_owner(videos, video_id, principal).await?;
    video.set_url(field, url);
    let updated = videos.update_video(&video).await?;
    tracing::info!(video_id = %video_id, field = %field, "Video record updated");
    Ok(updated)
}
