//! Tubely API Library
//!
//! HTTP surface of the upload pipelines: routes, bearer authentication, multipart
//! intake, and the thumbnail and video pipelines behind them.

mod api_doc;
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;
mod telemetry;
mod utils;

pub mod auth;
pub mod error;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use services::thumbnail_cache::{CachedThumbnail, ThumbnailCache};
pub use state::AppState;
