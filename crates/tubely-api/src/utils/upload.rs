//! Multipart intake helpers shared by the upload handlers

use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::http::{header::CONTENT_LENGTH, HeaderMap, StatusCode};
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use tubely_core::{AppError, MediaType};
use tubely_processing::{StagedUpload, StagingStore};

use crate::constants::MULTIPART_OVERHEAD_BYTES;

/// A fully buffered form field.
#[derive(Debug)]
pub struct UploadedPart {
    pub data: Bytes,
    pub media_type: MediaType,
    /// `Content-Type` of the part exactly as sent.
    pub content_type: String,
}

/// Body-limit hits inside the multipart parser surface as 413; anything else is a bad form.
pub fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::MalformedUpload(err.body_text())
    }
}

/// Largest request body accepted for a file budget of `max_file_bytes`.
pub fn body_limit(max_file_bytes: usize) -> usize {
    max_file_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)
}

/// Reject a request whose declared `Content-Length` cannot fit the body limit.
///
/// Requests without a usable length are left to the streaming limits.
pub fn reject_oversized_body(headers: &HeaderMap, max_file_bytes: usize) -> Result<(), AppError> {
    let declared = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let limit = body_limit(max_file_bytes);
    match declared {
        Some(len) if len > limit as u64 => Err(AppError::PayloadTooLarge(format!(
            "request body of {} bytes exceeds limit of {} bytes",
            len, limit
        ))),
        _ => Ok(()),
    }
}

fn budget_exceeded(max_bytes: usize) -> AppError {
    AppError::PayloadTooLarge(format!("limit is {} bytes", max_bytes))
}

/// Pass chunks through until more than `max_bytes` have been seen.
pub fn budgeted<S>(stream: S, max_bytes: usize) -> impl Stream<Item = Result<Bytes, AppError>>
where
    S: Stream<Item = Result<Bytes, MultipartError>>,
{
    let mut seen: usize = 0;
    stream.map(move |chunk| {
        let chunk = chunk.map_err(multipart_error)?;
        seen = seen.saturating_add(chunk.len());
        if seen > max_bytes {
            return Err(budget_exceeded(max_bytes));
        }
        Ok(chunk)
    })
}

/// Declared media type of a part, plus the raw header value.
pub fn declared_media_type(
    field: &Field<'_>,
    field_name: &str,
) -> Result<(MediaType, String), AppError> {
    let raw = field
        .content_type()
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .ok_or_else(|| AppError::MissingContentType(field_name.to_string()))?
        .to_string();
    let media_type = MediaType::parse(&raw)?;
    Ok((media_type, raw))
}

/// Read the field called `name` into memory, at most `max_bytes`.
pub async fn read_part(
    multipart: &mut Multipart,
    name: &str,
    max_bytes: usize,
) -> Result<UploadedPart, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(name) {
            continue;
        }

        let (media_type, content_type) = declared_media_type(&field, name)?;
        let mut body = std::pin::pin!(budgeted(field, max_bytes));
        let mut data = BytesMut::new();
        while let Some(chunk) = body.next().await {
            data.extend_from_slice(&chunk?);
        }

        tracing::debug!(
            field = %name,
            content_type = %content_type,
            size_bytes = data.len(),
            "Form field read"
        );

        return Ok(UploadedPart {
            data: data.freeze(),
            media_type,
            content_type,
        });
    }

    Err(missing_field(name))
}

/// Stream the field called `name` into a staged file, at most `max_bytes`.
///
/// `accept` sees the declared media type before any byte is staged.
pub async fn stage_part<F>(
    multipart: &mut Multipart,
    name: &str,
    staging: &StagingStore,
    file_name: &str,
    max_bytes: usize,
    accept: F,
) -> Result<(MediaType, StagedUpload), AppError>
where
    F: Fn(&MediaType) -> Result<(), AppError>,
{
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(name) {
            continue;
        }

        let (media_type, _) = declared_media_type(&field, name)?;
        accept(&media_type)?;

        let staged = staging.stage(file_name, budgeted(field, max_bytes)).await?;
        return Ok((media_type, staged));
    }

    Err(missing_field(name))
}

fn missing_field(name: &str) -> AppError {
    AppError::MalformedUpload(format!("form field '{}' not found", name))
}
