//! Staging store for uploads.
//!
//! Each request gets its own directory under the scratch root. The raw upload and
//! every file derived from it (e.g. the fast-start remux) live in that directory,
//! and the whole directory is removed when the [`StagedUpload`] is dropped, on
//! success, on error, and on early return alike.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tubely_core::AppError;

const DIR_PREFIX: &str = "tubely-upload-";

/// Scratch root that per-request staging directories are created in.
#[derive(Clone, Debug)]
pub struct StagingStore {
    root: PathBuf,
}

impl StagingStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Copy `stream` into a fresh file named `name_hint` inside a new staging directory.
    ///
    /// Stream errors are returned as-is; write failures become [`AppError::Staging`].
    /// Either way the partially written directory is removed before returning.
    pub async fn stage<S, E>(&self, name_hint: &str, stream: S) -> Result<StagedUpload, AppError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Into<AppError>,
    {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| staging_error("create scratch root", e))?;

        let dir = tempfile::Builder::new()
            .prefix(DIR_PREFIX)
            .tempdir_in(&self.root)
            .map_err(|e| staging_error("create staging directory", e))?;

        let path = dir.path().join(sanitize_name(name_hint));
        let mut file = File::options()
            .read(true)
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| staging_error("create staged file", e))?;

        let mut stream = std::pin::pin!(stream);
        let mut len: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(Into::into)?;
            file.write_all(&chunk)
                .await
                .map_err(|e| staging_error("write staged file", e))?;
            len += chunk.len() as u64;
        }
        file.flush()
            .await
            .map_err(|e| staging_error("flush staged file", e))?;

        tracing::debug!(path = %path.display(), size_bytes = len, "Upload staged");

        Ok(StagedUpload {
            file,
            path,
            len,
            dir,
        })
    }
}

fn staging_error(action: &str, err: std::io::Error) -> AppError {
    AppError::Staging(format!("Failed to {}: {}", action, err))
}

fn sanitize_name(hint: &str) -> String {
    let name: String = hint
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    if name.is_empty() || name.chars().all(|c| c == '.') {
        "upload".to_string()
    } else {
        name
    }
}

/// A staged upload and its directory.
///
/// Field order matters: the file handle is closed before the directory is removed.
#[derive(Debug)]
pub struct StagedUpload {
    file: File,
    path: PathBuf,
    len: u64,
    dir: TempDir,
}

impl StagedUpload {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Seek back to the first byte.
    pub async fn rewind(&mut self) -> Result<(), AppError> {
        self.file
            .seek(SeekFrom::Start(0))
            .await
            .map_err(|e| staging_error("rewind staged file", e))?;
        Ok(())
    }

    /// Rewind and read the whole staged file.
    pub async fn read_all(&mut self) -> Result<Bytes, AppError> {
        self.rewind().await?;
        let mut buf = Vec::with_capacity(self.len as usize);
        self.file
            .read_to_end(&mut buf)
            .await
            .map_err(|e| staging_error("read staged file", e))?;
        Ok(Bytes::from(buf))
    }

    /// Read a derivative written next to the upload, e.g. a remux output.
    pub async fn read_derivative(&self, path: &Path) -> Result<Bytes, AppError> {
        if !path.starts_with(self.dir.path()) {
            return Err(AppError::Staging(format!(
                "{} is outside the staging directory",
                path.display()
            )));
        }
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| staging_error("read derivative", e))?;
        Ok(Bytes::from(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use tubely_core::ErrorMetadata;

    fn chunks(parts: &[&'static [u8]]) -> impl Stream<Item = Result<Bytes, AppError>> {
        stream::iter(
            parts
                .iter()
                .map(|p| Ok(Bytes::from_static(p)))
                .collect::<Vec<_>>(),
        )
    }

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
    }

    #[tokio::test]
    async fn staged_bytes_read_back_exactly() {
        let scratch = TempDir::new().unwrap();
        let store = StagingStore::new(scratch.path());
        let original: Vec<u8> = (0..=255u8).cycle().take(70_000).collect();
        let (head, tail) = original.split_at(12_345);

        let mut staged = store
            .stage(
                "upload.mp4",
                stream::iter(vec![
                    Ok::<_, AppError>(Bytes::copy_from_slice(head)),
                    Ok(Bytes::copy_from_slice(tail)),
                ]),
            )
            .await
            .unwrap();

        assert_eq!(staged.len(), original.len() as u64);
        assert_eq!(&staged.read_all().await.unwrap()[..], &original[..]);
        // A second pass sees the same bytes.
        assert_eq!(&staged.read_all().await.unwrap()[..], &original[..]);
    }

    #[tokio::test]
    async fn directory_removed_on_drop() {
        let scratch = TempDir::new().unwrap();
        let store = StagingStore::new(scratch.path());

        let staged = store
            .stage("upload.mp4", chunks(&[b"abc", b"def"]))
            .await
            .unwrap();
        let derivative = staged.path().with_extension("mp4.processing");
        std::fs::write(&derivative, b"processed").unwrap();
        assert_eq!(entries(scratch.path()), 1);

        drop(staged);
        assert_eq!(entries(scratch.path()), 0);
    }

    #[tokio::test]
    async fn failed_stream_leaves_nothing_behind() {
        let scratch = TempDir::new().unwrap();
        let store = StagingStore::new(scratch.path());
        let body = stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err(AppError::PayloadTooLarge("limit is 1 GiB".into())),
        ]);

        let err = store.stage("upload.mp4", body).await.unwrap_err();
        assert_eq!(err.http_status_code(), 413);
        assert_eq!(entries(scratch.path()), 0);
    }

    #[tokio::test]
    async fn concurrent_uploads_get_distinct_directories() {
        let scratch = TempDir::new().unwrap();
        let store = StagingStore::new(scratch.path());
        let a = store.stage("upload.mp4", chunks(&[b"a"])).await.unwrap();
        let b = store.stage("upload.mp4", chunks(&[b"b"])).await.unwrap();
        assert_ne!(a.path(), b.path());
        assert_eq!(entries(scratch.path()), 2);
    }

    #[tokio::test]
    async fn derivatives_must_stay_inside_the_directory() {
        let scratch = TempDir::new().unwrap();
        let store = StagingStore::new(scratch.path());
        let staged = store.stage("upload.mp4", chunks(&[b"a"])).await.unwrap();
        assert!(staged
            .read_derivative(Path::new("/etc/hostname"))
            .await
            .is_err());
    }

    #[test]
    fn name_hints_are_sanitized() {
        assert_eq!(sanitize_name("../../etc/passwd"), "....etcpasswd");
        assert_eq!(sanitize_name("upload.mp4"), "upload.mp4");
        assert_eq!(sanitize_name(".."), "upload");
        assert_eq!(sanitize_name(""), "upload");
    }
}
