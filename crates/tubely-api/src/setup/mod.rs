//! Application setup and initialization
//!
//! Wires configuration into the database pool, storage backends, media toolkit,
//! and router.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::auth::jwt::JwtService;
use crate::services::thumbnail_cache::ThumbnailCache;
use crate::state::{AppState, AuthState, MediaState};
use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::PgVideoRepository;
use tubely_processing::{FfmpegToolkit, StagingStore};

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_json())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let (assets, publisher) = storage::setup_storage(&config).await?;

    let toolkit = FfmpegToolkit::new(
        config.ffprobe_path(),
        config.ffmpeg_path(),
        config.media_tool_timeout(),
        config.max_concurrent_media_jobs(),
    );

    let state = Arc::new(AppState {
        auth: AuthState {
            jwt: JwtService::new(config.jwt_secret()),
        },
        media: MediaState {
            assets,
            assets_root: config.assets_root().clone(),
            publisher,
            toolkit: Arc::new(toolkit),
            staging: StagingStore::new(config.staging_dir()),
            thumbnails: ThumbnailCache::new(),
            limits: config.upload_limits(),
        },
        videos: Arc::new(PgVideoRepository::new(pool)),
    });

    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
