//! Configuration module
//!
//! Settings for the Tubely API: asset locations, object storage, the JWT
//! signing secret, the database, and the media toolchain.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8091;
const MAX_CONNECTIONS: u32 = 10;
const MEDIA_TOOL_TIMEOUT_SECS: u64 = 300;
const MAX_CONCURRENT_MEDIA_JOBS: usize = 4;
const THUMBNAIL_MAX_BYTES: usize = 10 << 20;
const VIDEO_MAX_BYTES: usize = 1 << 30;

/// Byte budgets for the two upload endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadLimits {
    pub thumbnail_max_bytes: usize,
    pub video_max_bytes: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            thumbnail_max_bytes: THUMBNAIL_MAX_BYTES,
            video_max_bytes: VIDEO_MAX_BYTES,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub server_port: u16,
    pub environment: String,
    pub log_format: Option<String>,
    // Local thumbnail storage
    pub assets_root: PathBuf,
    pub assets_base_url: String,
    // Object storage for videos
    pub s3_bucket: String,
    pub s3_region: String,
    pub s3_endpoint: Option<String>, // S3-compatible providers (MinIO, R2, ...)
    pub s3_cf_distro: String,
    pub jwt_secret: String,
    pub database_url: String,
    pub db_max_connections: u32,
    // Media toolchain
    pub staging_dir: PathBuf,
    pub ffprobe_path: String,
    pub ffmpeg_path: String,
    pub media_tool_timeout_secs: u64,
    pub max_concurrent_media_jobs: usize,
    pub upload_limits: UploadLimits,
}

/// `key` parsed as a number, or `default` when unset.
fn number<F, T>(lookup: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number", key)),
        None => Ok(default),
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ServiceConfig>);

impl Config {
    fn inner(&self) -> &ServiceConfig {
        &self.0
    }

    /// Load `.env` (if any), then read the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, anyhow::Error> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| anyhow::anyhow!("{} must be set", key))
        };

        let server_port = number(&lookup, "PORT", DEFAULT_PORT)?;

        let assets_base_url = lookup("ASSETS_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{}/assets", server_port))
            .trim_end_matches('/')
            .to_string();

        let defaults = UploadLimits::default();
        let upload_limits = UploadLimits {
            thumbnail_max_bytes: number(&lookup, "THUMBNAIL_MAX_BYTES", defaults.thumbnail_max_bytes)?,
            video_max_bytes: number(&lookup, "VIDEO_MAX_BYTES", defaults.video_max_bytes)?,
        };

        let config = ServiceConfig {
            server_port,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            log_format: lookup("LOG_FORMAT"),
            assets_root: PathBuf::from(required("ASSETS_ROOT")?),
            assets_base_url,
            s3_bucket: required("S3_BUCKET")?,
            s3_region: required("S3_REGION")?,
            s3_endpoint: lookup("S3_ENDPOINT").filter(|v| !v.trim().is_empty()),
            s3_cf_distro: required("S3_CF_DISTRO")?
                .trim_end_matches('/')
                .to_string(),
            jwt_secret: required("JWT_SECRET")?,
            database_url: required("DATABASE_URL")?,
            db_max_connections: number(&lookup, "DB_MAX_CONNECTIONS", MAX_CONNECTIONS)?,
            staging_dir: lookup("STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            ffprobe_path: lookup("FFPROBE_PATH").unwrap_or_else(|| "ffprobe".to_string()),
            ffmpeg_path: lookup("FFMPEG_PATH").unwrap_or_else(|| "ffmpeg".to_string()),
            media_tool_timeout_secs: number(
                &lookup,
                "MEDIA_TOOL_TIMEOUT_SECS",
                MEDIA_TOOL_TIMEOUT_SECS,
            )?,
            max_concurrent_media_jobs: number(
                &lookup,
                "MAX_CONCURRENT_MEDIA_JOBS",
                MAX_CONCURRENT_MEDIA_JOBS,
            )?,
            upload_limits,
        };

        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let c = self.inner();

        if c.jwt_secret.trim().is_empty() {
            return Err(anyhow::anyhow!("JWT_SECRET must not be empty"));
        }

        for (key, url) in [
            ("ASSETS_BASE_URL", &c.assets_base_url),
            ("S3_CF_DISTRO", &c.s3_cf_distro),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow::anyhow!("{} must be an http(s) URL", key));
            }
        }

        if c.upload_limits.thumbnail_max_bytes == 0 || c.upload_limits.video_max_bytes == 0 {
            return Err(anyhow::anyhow!("Upload limits must be greater than zero"));
        }

        if c.media_tool_timeout_secs == 0 {
            return Err(anyhow::anyhow!("MEDIA_TOOL_TIMEOUT_SECS must be greater than zero"));
        }

        if c.max_concurrent_media_jobs == 0 {
            return Err(anyhow::anyhow!("MAX_CONCURRENT_MEDIA_JOBS must be greater than zero"));
        }

        if c.db_max_connections == 0 {
            return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS must be greater than zero"));
        }

        Ok(())
    }

    pub fn server_port(&self) -> u16 {
        self.inner().server_port
    }

    pub fn environment(&self) -> &str {
        &self.inner().environment
    }

    pub fn log_json(&self) -> bool {
        self.inner()
            .log_format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }

    pub fn assets_root(&self) -> &PathBuf {
        &self.inner().assets_root
    }

    pub fn assets_base_url(&self) -> &str {
        &self.inner().assets_base_url
    }

    pub fn s3_bucket(&self) -> &str {
        &self.inner().s3_bucket
    }

    pub fn s3_region(&self) -> &str {
        &self.inner().s3_region
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().s3_endpoint.as_deref()
    }

    pub fn s3_cf_distro(&self) -> &str {
        &self.inner().s3_cf_distro
    }

    pub fn jwt_secret(&self) -> &str {
        &self.inner().jwt_secret
    }

    pub fn database_url(&self) -> &str {
        &self.inner().database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().db_max_connections
    }

    pub fn staging_dir(&self) -> &PathBuf {
        &self.inner().staging_dir
    }

    pub fn ffprobe_path(&self) -> &str {
        &self.inner().ffprobe_path
    }

    pub fn ffmpeg_path(&self) -> &str {
        &self.inner().ffmpeg_path
    }

    pub fn media_tool_timeout(&self) -> Duration {
        Duration::from_secs(self.inner().media_tool_timeout_secs)
    }

    pub fn max_concurrent_media_jobs(&self) -> usize {
        self.inner().max_concurrent_media_jobs
    }

    pub fn upload_limits(&self) -> UploadLimits {
        self.inner().upload_limits
    }
}
