use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tubely_core::{AppError, Video};
use uuid::Uuid;

use crate::repository::VideoRepository;

/// Process-local record store.
///
/// Clones share the same records. `set_fail_updates(true)` makes every
/// `update_video` fail with a persistence error.
#[derive(Clone, Default)]
pub struct InMemoryVideoRepository {
    videos: Arc<RwLock<HashMap<Uuid, Video>>>,
    fail_updates: Arc<AtomicBool>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record.
    pub async fn insert(&self, video: Video) {
        self.videos.write().await.insert(video.id, video);
    }

    pub async fn remove(&self, id: Uuid) -> Option<Video> {
        self.videos.write().await.remove(&id)
    }

    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn update_video(&self, video: &Video) -> Result<Video, AppError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::Persistence("update rejected".to_string()));
        }

        let mut videos = self.videos.write().await;
        let stored = videos
            .get_mut(&video.id)
            .ok_or_else(|| AppError::RecordNotFound(video.id.to_string()))?;

        *stored = Video {
            updated_at: Utc::now(),
            created_at: stored.created_at,
            ..video.clone()
        };
        Ok(stored.clone())
    }
}
