pub mod record_updater;
pub mod thumbnail_cache;
pub mod thumbnail_pipeline;
pub mod video_pipeline;

pub use record_updater::{update_record_url, Compensation};
pub use thumbnail_cache::{CacheTicket, CachedThumbnail, ThumbnailCache};
