//! Video inspection and normalization.

pub mod classify;
pub mod faststart;
pub mod probe;
pub mod toolkit;

pub use classify::VideoCategory;
pub use probe::AspectRatio;
pub use toolkit::{FfmpegToolkit, MediaToolkit};
