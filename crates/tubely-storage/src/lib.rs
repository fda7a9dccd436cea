//! Tubely Storage Library
//!
//! Places where finished assets are published:
//!
//! - [`ObjectStorage`]: a bucket behind `object_store` (S3 in production, in-memory
//!   in tests). Videos go here under `<category>/<name>.mp4`.
//! - [`LocalStorage`]: the asset root on local disk, served under `/assets`.
//!   Thumbnails go here as `<name>.<ext>`.
//!
//! Keys must not contain `..` or a leading `/`.

pub mod local;
pub mod object;
pub mod traits;

pub use local::LocalStorage;
pub use object::ObjectStorage;
pub use traits::{Storage, StorageError, StorageResult};
