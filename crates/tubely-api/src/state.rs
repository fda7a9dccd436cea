//! Application state.
//!
//! Split so the auth middleware only sees the JWT verifier, while handlers
//! get the record store and the media sub-state.

use std::path::PathBuf;
use std::sync::Arc;
use tubely_core::UploadLimits;
use tubely_db::VideoRepository;
use tubely_processing::{MediaToolkit, StagingStore};
use tubely_storage::Storage;

use crate::auth::jwt::JwtService;
use crate::services::thumbnail_cache::ThumbnailCache;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: JwtService,
}

/// Everything the upload pipelines touch besides the record store.
#[derive(Clone)]
pub struct MediaState {
    /// Asset root (thumbnails), served under `/assets`.
    pub assets: Arc<dyn Storage>,
    pub assets_root: PathBuf,
    /// Object storage bucket (videos).
    pub publisher: Arc<dyn Storage>,
    pub toolkit: Arc<dyn MediaToolkit>,
    pub staging: StagingStore,
    pub thumbnails: ThumbnailCache,
    pub limits: UploadLimits,
}

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub media: MediaState,
    pub videos: Arc<dyn VideoRepository>,
}
