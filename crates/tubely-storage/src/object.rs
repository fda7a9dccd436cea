use crate::traits::{validate_key, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, AttributeValue, Attributes, ObjectStore, ObjectStoreExt, PutOptions, PutPayload,
};
use std::sync::Arc;
use std::time::Instant;

/// Object storage bucket fronted by a distribution URL.
///
/// Public URLs are `<distribution>/<key>`; the bucket itself stays private.
#[derive(Clone)]
pub struct ObjectStorage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    distribution_url: String,
}

impl ObjectStorage {
    /// S3 (or S3-compatible, when `endpoint_url` is set) bucket.
    ///
    /// Credentials come from the standard `AWS_*` environment variables.
    pub fn s3(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        distribution_url: String,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket.clone());

        if let Some(endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder.with_endpoint(endpoint).with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::new(Arc::new(store), bucket, distribution_url))
    }

    /// Process-local bucket, for tests and local development.
    pub fn in_memory(distribution_url: impl Into<String>) -> Self {
        Self::new(Arc::new(InMemory::new()), "memory".to_string(), distribution_url.into())
    }

    pub fn new(store: Arc<dyn ObjectStore>, bucket: String, distribution_url: String) -> Self {
        Self {
            store,
            bucket,
            distribution_url: distribution_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Raw bytes and content type of a stored object.
    pub async fn fetch(&self, key: &str) -> StorageResult<(Bytes, Option<String>)> {
        validate_key(key)?;
        let result = self
            .store
            .get(&Path::from(key))
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;
        let content_type = result
            .attributes
            .get(&Attribute::ContentType)
            .map(|v| v.to_string());
        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;
        Ok((bytes, content_type))
    }
}

#[async_trait]
impl Storage for ObjectStorage {
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String> {
        validate_key(key)?;
        let size = data.len();
        let location = Path::from(key);
        let start = Instant::now();

        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(content_type.to_string()),
        );
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        self.store
            .put_opts(&location, PutPayload::from(data), opts)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Object upload failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object upload successful"
        );

        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        let start = Instant::now();

        match self.store.delete(&Path::from(key)).await {
            Ok(()) | Err(ObjectStoreError::NotFound { .. }) => {}
            Err(e) => {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Object delete failed"
                );
                return Err(StorageError::DeleteFailed(e.to_string()));
            }
        }

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object delete successful"
        );

        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        validate_key(key)?;
        match self.store.head(&Path::from(key)).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.distribution_url, key)
    }
}
