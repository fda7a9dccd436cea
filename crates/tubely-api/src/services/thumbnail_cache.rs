//! In-process thumbnail cache.
//!
//! Owned by application state and shared through `Arc`. Writes for the same
//! video id are serialized by the map lock and stamped with a generation number.
//! Each key keeps the served entry and the last entry whose record update
//! succeeded; a rollback falls back to the latter, never to another in-flight
//! write.

use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedThumbnail {
    pub data: Bytes,
    /// Content type exactly as the client declared it.
    pub media_type: String,
}

#[derive(Debug, Clone)]
struct Entry {
    generation: u64,
    thumbnail: CachedThumbnail,
}

#[derive(Debug, Default)]
struct Slot {
    current: Option<Entry>,
    committed: Option<Entry>,
}

/// Handle on one insert, settled by [`ThumbnailCache::commit`] or
/// [`ThumbnailCache::rollback`].
#[derive(Debug, Clone)]
pub struct CacheTicket {
    video_id: Uuid,
    entry: Entry,
}

impl CacheTicket {
    pub fn video_id(&self) -> Uuid {
        self.video_id
    }

    fn generation(&self) -> u64 {
        self.entry.generation
    }
}

#[derive(Clone, Default)]
pub struct ThumbnailCache {
    slots: Arc<RwLock<HashMap<Uuid, Slot>>>,
    generations: Arc<AtomicU64>,
}

impl ThumbnailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `thumbnail` for `video_id` from now on, pending commit.
    pub async fn insert(&self, video_id: Uuid, thumbnail: CachedThumbnail) -> CacheTicket {
        let entry = Entry {
            generation: self.generations.fetch_add(1, Ordering::Relaxed) + 1,
            thumbnail,
        };
        self.slots.write().await.entry(video_id).or_default().current = Some(entry.clone());
        CacheTicket { video_id, entry }
    }

    pub async fn get(&self, video_id: Uuid) -> Option<CachedThumbnail> {
        self.slots
            .read()
            .await
            .get(&video_id)
            .and_then(|slot| slot.current.as_ref())
            .map(|e| e.thumbnail.clone())
    }

    /// Mark the insert behind `ticket` as backed by a persisted record.
    ///
    /// The entry becomes the rollback target unless a newer one already is, and
    /// is served again if nothing newer is. Returns whether the committed entry
    /// changed.
    pub async fn commit(&self, ticket: &CacheTicket) -> bool {
        let generation = ticket.generation();
        let mut slots = self.slots.write().await;
        let slot = slots.entry(ticket.video_id).or_default();
        if slot
            .committed
            .as_ref()
            .is_some_and(|e| e.generation > generation)
        {
            return false;
        }
        slot.committed = Some(ticket.entry.clone());
        if slot
            .current
            .as_ref()
            .is_none_or(|e| e.generation < generation)
        {
            slot.current = Some(ticket.entry.clone());
        }
        true
    }

    /// Undo the insert behind `ticket`.
    ///
    /// The last committed entry is served again, or the key disappears if there
    /// is none. If a later insert already replaced the entry nothing changes.
    /// Returns whether the cache was modified.
    pub async fn rollback(&self, ticket: &CacheTicket) -> bool {
        let generation = ticket.generation();
        let mut slots = self.slots.write().await;
        let Some(slot) = slots.get_mut(&ticket.video_id) else {
            return false;
        };
        match &slot.current {
            Some(current) if current.generation == generation => {}
            _ => return false,
        }
        slot.current = slot.committed.clone();
        if slot.current.is_none() {
            slots.remove(&ticket.video_id);
        }
        true
    }

    /// Number of video ids with a served thumbnail.
    pub async fn len(&self) -> usize {
        self.slots
            .read()
            .await
            .values()
            .filter(|slot| slot.current.is_some())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
