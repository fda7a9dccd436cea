//! Tubely Processing Library
//!
//! Local handling of uploaded media between intake and publish:
//!
//! - [`staging`]: per-request scratch directories holding the raw upload and
//!   any derivative, removed when the request finishes.
//! - [`video`]: aspect-ratio inspection (ffprobe), fast-start remux (ffmpeg), and
//!   the category a video is filed under.

pub mod error;
pub mod staging;
pub mod video;

pub use error::{MediaError, MediaResult, MediaTool};
pub use staging::{StagedUpload, StagingStore};
pub use video::{AspectRatio, FfmpegToolkit, MediaToolkit, VideoCategory};
