//! Error types for media operations.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use thiserror::Error;
use tubely_core::AppError;

pub type MediaResult<T> = Result<T, MediaError>;

/// External binary a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaTool {
    Probe,
    Transcode,
}

impl Display for MediaTool {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MediaTool::Probe => write!(f, "ffprobe"),
            MediaTool::Transcode => write!(f, "ffmpeg"),
        }
    }
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("{tool} could not be started: {source}")]
    Spawn {
        tool: MediaTool,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed: {message}")]
    Failed {
        tool: MediaTool,
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("{tool} timed out after {secs} seconds")]
    Timeout { tool: MediaTool, secs: u64 },

    #[error("Invalid probe output: {0}")]
    ProbeOutput(#[from] serde_json::Error),

    #[error("No streams found in {0}")]
    NoStreams(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    pub fn failed(
        tool: MediaTool,
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::Failed {
            tool,
            message: message.into(),
            stderr,
            exit_code,
        }
    }
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        let message = match &err {
            MediaError::Failed {
                stderr: Some(stderr),
                ..
            } if !stderr.trim().is_empty() => format!("{}: {}", err, stderr.trim()),
            _ => err.to_string(),
        };
        match err {
            MediaError::ProbeOutput(_) => AppError::ProbeOutput(message),
            MediaError::NoStreams(path) => AppError::NoStreamsFound(path.display().to_string()),
            MediaError::Io(_) => AppError::Staging(message),
            MediaError::Spawn { tool, .. }
            | MediaError::Failed { tool, .. }
            | MediaError::Timeout { tool, .. } => match tool {
                MediaTool::Probe => AppError::ProbeExecution(message),
                MediaTool::Transcode => AppError::TranscodeExecution(message),
            },
        }
    }
}
