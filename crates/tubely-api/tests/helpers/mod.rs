//! Test helpers: an in-memory `AppState` behind a `TestServer`.
//!
//! No database or media binaries are needed: records live in
//! `InMemoryVideoRepository`, videos in an in-memory bucket, thumbnails in a
//! temp asset root, and ffprobe/ffmpeg are replaced by [`fakes::FakeToolkit`].

#![allow(dead_code)]

pub mod auth;
pub mod fakes;
pub mod fixtures;

use axum_test::TestServer;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tubely_api::auth::jwt::JwtService;
use tubely_api::setup::routes::setup_routes;
use tubely_api::state::{AppState, AuthState, MediaState};
use tubely_api::ThumbnailCache;
use tubely_core::{UploadLimits, Video};
use tubely_db::{InMemoryVideoRepository, VideoRepository};
use tubely_processing::StagingStore;
use tubely_storage::{LocalStorage, ObjectStorage, Storage};
use uuid::Uuid;

use fakes::{FakeToolkit, RecordingStorage, ToolFailure};

pub const JWT_SECRET: &str = "integration-test-secret";
pub const ASSETS_BASE_URL: &str = "http://localhost:8091/assets";
pub const DISTRIBUTION_URL: &str = "https://d111111abcdef8.cloudfront.net";

pub struct TestApp {
    pub server: TestServer,
    pub videos: InMemoryVideoRepository,
    pub bucket: ObjectStorage,
    pub published: Arc<RecordingStorage>,
    pub thumbnails: ThumbnailCache,
    pub toolkit: Arc<FakeToolkit>,
    pub assets_dir: TempDir,
    pub scratch_dir: TempDir,
}

/// Knobs for [`setup_test_app_with`].
pub struct TestOptions {
    pub aspect_ratio: &'static str,
    pub limits: UploadLimits,
    pub publisher: Option<Arc<dyn Storage>>,
    pub toolkit_failure: Option<ToolFailure>,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            aspect_ratio: "16:9",
            limits: UploadLimits::default(),
            publisher: None,
            toolkit_failure: None,
        }
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(TestOptions::default()).await
}

pub async fn setup_test_app_with(options: TestOptions) -> TestApp {
    let assets_dir = TempDir::new().unwrap();
    let scratch_dir = TempDir::new().unwrap();

    let videos = InMemoryVideoRepository::new();
    let bucket = ObjectStorage::in_memory(DISTRIBUTION_URL);
    let published = Arc::new(RecordingStorage::new(Arc::new(bucket.clone())));
    let thumbnails = ThumbnailCache::new();
    let toolkit = Arc::new(FakeToolkit::new(options.aspect_ratio).failing(options.toolkit_failure));

    let assets = LocalStorage::new(assets_dir.path(), ASSETS_BASE_URL.to_string())
        .await
        .unwrap();

    let state = Arc::new(AppState {
        auth: AuthState {
            jwt: JwtService::new(JWT_SECRET),
        },
        media: MediaState {
            assets: Arc::new(assets),
            assets_root: assets_dir.path().to_path_buf(),
            publisher: options
                .publisher
                .unwrap_or_else(|| published.clone() as Arc<dyn Storage>),
            toolkit: toolkit.clone(),
            staging: StagingStore::new(scratch_dir.path()),
            thumbnails: thumbnails.clone(),
            limits: options.limits,
        },
        videos: Arc::new(videos.clone()),
    });

    let server = TestServer::new(setup_routes(state)).unwrap();

    TestApp {
        server,
        videos,
        bucket,
        published,
        thumbnails,
        toolkit,
        assets_dir,
        scratch_dir,
    }
}

impl TestApp {
    /// Insert a fresh record owned by `owner`.
    pub async fn seed_video(&self, owner: Uuid) -> Video {
        let video = Video::new(owner, "Boot.dev beats", "a test upload");
        self.videos.insert(video.clone()).await;
        video
    }

    pub async fn stored_video(&self, id: Uuid) -> Video {
        self.videos.get_video(id).await.unwrap().unwrap()
    }
}

pub fn dir_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}
