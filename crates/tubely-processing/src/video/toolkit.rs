use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::sync::Semaphore;

use super::faststart;
use super::probe::{self, AspectRatio};
use crate::error::{MediaError, MediaResult, MediaTool};

/// What the video pipeline needs from external media tools.
#[async_trait]
pub trait MediaToolkit: Send + Sync {
    /// Display aspect ratio of the file's first stream.
    async fn inspect(&self, path: &Path) -> MediaResult<AspectRatio>;

    /// Write a fast-start copy of `path` and return where it was written.
    /// The input is left in place.
    async fn normalize(&self, path: &Path) -> MediaResult<PathBuf>;
}

/// ffprobe/ffmpeg subprocesses.
///
/// Every invocation holds a permit from a shared semaphore and is killed if it
/// outlives `timeout`.
#[derive(Clone)]
pub struct FfmpegToolkit {
    ffprobe_path: String,
    ffmpeg_path: String,
    timeout: Duration,
    permits: Arc<Semaphore>,
}

impl FfmpegToolkit {
    pub fn new(
        ffprobe_path: impl Into<String>,
        ffmpeg_path: impl Into<String>,
        timeout: Duration,
        max_concurrent_jobs: usize,
    ) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
            ffmpeg_path: ffmpeg_path.into(),
            timeout,
            permits: Arc::new(Semaphore::new(max_concurrent_jobs.max(1))),
        }
    }

    fn program(&self, tool: MediaTool) -> &str {
        match tool {
            MediaTool::Probe => &self.ffprobe_path,
            MediaTool::Transcode => &self.ffmpeg_path,
        }
    }

    async fn run(&self, tool: MediaTool, args: Vec<OsString>) -> MediaResult<Output> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| MediaError::failed(tool, "media job limiter closed", None, None))?;

        let program = self.program(tool);
        let mut cmd = Command::new(program);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let start = Instant::now();
        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(result) => result.map_err(|source| MediaError::Spawn { tool, source })?,
            Err(_) => {
                // Dropping the output future killed the child.
                tracing::warn!(
                    tool = %tool,
                    timeout_secs = self.timeout.as_secs(),
                    "Media tool timed out, process killed"
                );
                return Err(MediaError::Timeout {
                    tool,
                    secs: self.timeout.as_secs(),
                });
            }
        };

        tracing::debug!(
            tool = %tool,
            status = %output.status,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Media tool finished"
        );

        if !output.status.success() {
            return Err(MediaError::failed(
                tool,
                format!("exited with {}", output.status),
                Some(String::from_utf8_lossy(&output.stderr).into_owned()),
                output.status.code(),
            ));
        }

        Ok(output)
    }
}

#[async_trait]
impl MediaToolkit for FfmpegToolkit {
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    async fn inspect(&self, path: &Path) -> MediaResult<AspectRatio> {
        let output = self.run(MediaTool::Probe, probe::probe_args(path)).await?;
        let ratio = probe::parse_aspect_ratio(&output.stdout, path)?;
        tracing::debug!(aspect_ratio = %ratio, "Aspect ratio probed");
        Ok(ratio)
    }

    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    async fn normalize(&self, path: &Path) -> MediaResult<PathBuf> {
        let output_path = faststart::output_path(path);
        self.run(
            MediaTool::Transcode,
            faststart::remux_args(path, &output_path),
        )
        .await?;
        Ok(output_path)
    }
}
