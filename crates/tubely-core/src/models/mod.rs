pub mod video;

pub use video::{UrlField, Video};
