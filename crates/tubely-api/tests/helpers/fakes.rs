use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tubely_processing::{AspectRatio, MediaError, MediaResult, MediaTool, MediaToolkit};
use tubely_storage::{Storage, StorageError, StorageResult};

/// Way a [`FakeToolkit`] step can break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolFailure {
    /// ffprobe exits non-zero.
    InspectExit,
    /// ffprobe prints something that is not JSON.
    InspectOutput,
    /// ffprobe reports no streams.
    NoStreams,
    /// ffmpeg exits non-zero after writing part of its output.
    NormalizeExit,
}

/// Reports a fixed aspect ratio; "remuxes" by copying the file.
pub struct FakeToolkit {
    aspect_ratio: &'static str,
    failure: Option<ToolFailure>,
    inspect_calls: AtomicUsize,
    normalize_calls: AtomicUsize,
}

impl FakeToolkit {
    pub fn new(aspect_ratio: &'static str) -> Self {
        Self {
            aspect_ratio,
            failure: None,
            inspect_calls: AtomicUsize::new(0),
            normalize_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(mut self, failure: Option<ToolFailure>) -> Self {
        self.failure = failure;
        self
    }

    pub fn calls(&self) -> usize {
        self.inspect_calls.load(Ordering::SeqCst) + self.normalize_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaToolkit for FakeToolkit {
    async fn inspect(&self, path: &Path) -> MediaResult<AspectRatio> {
        self.inspect_calls.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Some(ToolFailure::InspectExit) => Err(MediaError::failed(
                MediaTool::Probe,
                "exited with status 1",
                Some("moov atom not found".to_string()),
                Some(1),
            )),
            Some(ToolFailure::InspectOutput) => {
                Err(serde_json::from_slice::<serde_json::Value>(b"{\"streams\":").unwrap_err().into())
            }
            Some(ToolFailure::NoStreams) => Err(MediaError::NoStreams(path.to_path_buf())),
            _ => Ok(AspectRatio::new(self.aspect_ratio)),
        }
    }

    async fn normalize(&self, path: &Path) -> MediaResult<PathBuf> {
        self.normalize_calls.fetch_add(1, Ordering::SeqCst);
        let mut output = path.as_os_str().to_owned();
        output.push(".processing");
        let output = PathBuf::from(output);
        if self.failure == Some(ToolFailure::NormalizeExit) {
            tokio::fs::write(&output, b"partial").await?;
            return Err(MediaError::failed(
                MediaTool::Transcode,
                "exited with status 1",
                Some("Invalid data found when processing input".to_string()),
                Some(1),
            ));
        }
        tokio::fs::copy(path, &output).await?;
        Ok(output)
    }
}

/// Delegates to a real backend and remembers every key written.
pub struct RecordingStorage {
    inner: Arc<dyn Storage>,
    keys: Mutex<Vec<String>>,
}

impl RecordingStorage {
    pub fn new(inner: Arc<dyn Storage>) -> Self {
        Self {
            inner,
            keys: Mutex::new(Vec::new()),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<String> {
        self.keys.lock().unwrap().push(key.to_string());
        self.inner.put_object(key, data, content_type).await
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.inner.exists(key).await
    }

    fn public_url(&self, key: &str) -> String {
        self.inner.public_url(key)
    }
}

/// A bucket that rejects every write.
pub struct UnavailableStorage;

#[async_trait]
impl Storage for UnavailableStorage {
    async fn put_object(&self, _key: &str, _data: Bytes, _content_type: &str) -> StorageResult<String> {
        Err(StorageError::UploadFailed("bucket unavailable".to_string()))
    }

    async fn delete(&self, _key: &str) -> StorageResult<()> {
        Ok(())
    }

    async fn exists(&self, _key: &str) -> StorageResult<bool> {
        Ok(false)
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://unavailable.example.com/{}", key)
    }
}
