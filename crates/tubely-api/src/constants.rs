//! Route paths and multipart field names.

pub const THUMBNAIL_UPLOAD_PATH: &str = "/videos/{video_id}/thumbnail";
pub const VIDEO_UPLOAD_PATH: &str = "/videos/{video_id}/video";
pub const THUMBNAIL_GET_PATH: &str = "/thumbnails/{video_id}";
pub const ASSETS_PATH: &str = "/assets";

pub const THUMBNAIL_FIELD: &str = "thumbnail";
pub const VIDEO_FIELD: &str = "video";

/// File name the raw video upload is staged under.
pub const STAGED_VIDEO_NAME: &str = "upload.mp4";

/// Transport limits sit this far above a route's file budget to leave room for
/// multipart boundaries and part headers.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;
