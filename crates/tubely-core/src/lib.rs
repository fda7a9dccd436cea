//! Tubely Core Library
//!
//! Domain model, error taxonomy, configuration, and the small pure helpers
//! (media-type parsing, asset naming) shared by every Tubely crate.

pub mod assets;
pub mod config;
pub mod error;
pub mod media_type;
pub mod models;

// Re-export commonly used types
pub use assets::{asset_file_name, random_asset_name};
pub use config::{Config, UploadLimits};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use media_type::MediaType;
pub use models::{UrlField, Video};
