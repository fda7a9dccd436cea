//! Storage backends: the local asset root and the video bucket.

use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_storage::{LocalStorage, ObjectStorage, Storage};

pub async fn setup_storage(config: &Config) -> Result<(Arc<dyn Storage>, Arc<dyn Storage>)> {
    let assets = LocalStorage::new(
        config.assets_root().clone(),
        config.assets_base_url().to_string(),
    )
    .await
    .context("Failed to initialize asset root")?;

    tracing::info!(
        path = %config.assets_root().display(),
        base_url = %config.assets_base_url(),
        "Asset storage initialized"
    );

    let bucket = ObjectStorage::s3(
        config.s3_bucket().to_string(),
        config.s3_region().to_string(),
        config.s3_endpoint().map(String::from),
        config.s3_cf_distro().to_string(),
    )
    .context("Failed to initialize S3 storage")?;

    tracing::info!(
        bucket = %bucket.bucket(),
        region = %config.s3_region(),
        distribution = %config.s3_cf_distro(),
        "Object storage initialized"
    );

    Ok((Arc::new(assets), Arc::new(bucket)))
}
