use async_trait::async_trait;
use tubely_core::{AppError, Video};
use uuid::Uuid;

/// Read/write access to video records.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// `Ok(None)` when no record has this id; `Err` only when the lookup itself failed.
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Persist `video` over the stored record with the same id and return what was stored.
    ///
    /// Fails with [`AppError::RecordNotFound`] if the record vanished and
    /// [`AppError::Persistence`] if the write failed.
    async fn update_video(&self, video: &Video) -> Result<Video, AppError>;
}
