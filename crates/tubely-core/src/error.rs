//! Error types module
//!
//! All failures the upload pipelines can produce are unified under [`AppError`].
//! Each variant self-describes how it is presented over HTTP through
//! [`ErrorMetadata`], so handlers never pick status codes by hand.
//!
//! The `Database` variant wraps `sqlx::Error` when the `sqlx` feature is on.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for rejected but well-formed requests
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DATABASE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Thumbnail not found: {0}")]
    ThumbnailNotFound(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Malformed upload: {0}")]
    MalformedUpload(String),

    #[error("Missing Content-Type for {0}")]
    MissingContentType(String),

    #[error("Invalid media type: {0}")]
    InvalidMediaType(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Staging I/O error: {0}")]
    Staging(String),

    #[error("Probe execution failed: {0}")]
    ProbeExecution(String),

    #[error("Probe output invalid: {0}")]
    ProbeOutput(String),

    #[error("No streams found in {0}")]
    NoStreamsFound(String),

    #[error("Transcode execution failed: {0}")]
    TranscodeExecution(String),

    #[error("Publish failed: {0}")]
    Publish(String),

    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Staging(err.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidIdentifier(err.to_string())
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::InvalidIdentifier(_) => (
            400,
            "INVALID_IDENTIFIER",
            false,
            Some("Use a valid video UUID in the path"),
            false,
            LogLevel::Debug,
        ),
        AppError::MissingCredential(_) => (
            401,
            "MISSING_CREDENTIAL",
            false,
            Some("Send an Authorization: Bearer <token> header"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidCredential(_) => (
            401,
            "INVALID_CREDENTIAL",
            false,
            Some("Log in again to obtain a fresh token"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotAuthorized(_) => (
            401,
            "NOT_AUTHORIZED",
            false,
            None,
            false,
            LogLevel::Warn,
        ),
        AppError::RecordNotFound(_) => (
            404,
            "RECORD_NOT_FOUND",
            false,
            Some("Verify the video ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::ThumbnailNotFound(_) => (
            404,
            "THUMBNAIL_NOT_FOUND",
            false,
            Some("Upload a thumbnail for this video first"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce file size and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::MalformedUpload(_) => (
            400,
            "MALFORMED_UPLOAD",
            false,
            Some("Send a multipart/form-data body with the expected file field"),
            false,
            LogLevel::Debug,
        ),
        AppError::MissingContentType(_) => (
            400,
            "MISSING_CONTENT_TYPE",
            false,
            Some("Set a Content-Type on the file part"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidMediaType(_) => (
            400,
            "INVALID_MEDIA_TYPE",
            false,
            Some("Use a media type of the form type/subtype"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnsupportedMediaType(_) => (
            400,
            "UNSUPPORTED_MEDIA_TYPE",
            false,
            Some("Upload an MP4 file (video/mp4)"),
            false,
            LogLevel::Debug,
        ),
        AppError::Staging(_) => (
            500,
            "STAGING_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::ProbeExecution(_) => (
            500,
            "PROBE_ERROR",
            false,
            Some("Check that the file is a valid video"),
            true,
            LogLevel::Error,
        ),
        AppError::ProbeOutput(_) => (
            500,
            "PROBE_OUTPUT_ERROR",
            false,
            Some("Contact support if this error persists"),
            true,
            LogLevel::Error,
        ),
        AppError::NoStreamsFound(_) => (
            500,
            "NO_STREAMS_FOUND",
            false,
            Some("Check that the file contains a video stream"),
            true,
            LogLevel::Error,
        ),
        AppError::TranscodeExecution(_) => (
            500,
            "TRANSCODE_ERROR",
            false,
            Some("Contact support if this error persists"),
            true,
            LogLevel::Error,
        ),
        AppError::Publish(_) => (
            500,
            "PUBLISH_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Database(_) => (
            500,
            "DATABASE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Persistence(_) => (
            500,
            "PERSISTENCE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidIdentifier(_) => "Invalid ID".to_string(),
            AppError::MissingCredential(_) => "Couldn't find JWT".to_string(),
            AppError::InvalidCredential(_) => "Couldn't validate JWT".to_string(),
            AppError::NotAuthorized(_) => "Not authorized to update this video".to_string(),
            AppError::RecordNotFound(_) => "Couldn't find video".to_string(),
            AppError::ThumbnailNotFound(_) => "Thumbnail not found".to_string(),
            AppError::PayloadTooLarge(msg) => format!("File too large: {}", msg),
            AppError::MalformedUpload(_) => "Unable to parse form file".to_string(),
            AppError::MissingContentType(field) => format!("Missing Content-Type for {}", field),
            AppError::InvalidMediaType(_) => "Invalid media type".to_string(),
            AppError::UnsupportedMediaType(_) => "Must be an mp4".to_string(),
            AppError::Staging(_) => "Error staging upload".to_string(),
            AppError::ProbeExecution(_) | AppError::ProbeOutput(_) | AppError::NoStreamsFound(_) => {
                "Error getting aspect ratio".to_string()
            }
            AppError::TranscodeExecution(_) => "Error processing video".to_string(),
            AppError::Publish(_) => "Couldn't store uploaded file".to_string(),
            AppError::Database(_) => "A database error occurred".to_string(),
            AppError::Persistence(_) => "Couldn't update video".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "An internal error occurred".to_string()
            }
        }
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }
}

impl AppError {
    /// Variant name, used as `error_type` in logs and non-production responses.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidIdentifier(_) => "InvalidIdentifier",
            AppError::MissingCredential(_) => "MissingCredential",
            AppError::InvalidCredential(_) => "InvalidCredential",
            AppError::NotAuthorized(_) => "NotAuthorized",
            AppError::RecordNotFound(_) => "RecordNotFound",
            AppError::ThumbnailNotFound(_) => "ThumbnailNotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::MalformedUpload(_) => "MalformedUpload",
            AppError::MissingContentType(_) => "MissingContentType",
            AppError::InvalidMediaType(_) => "InvalidMediaType",
            AppError::UnsupportedMediaType(_) => "UnsupportedMediaType",
            AppError::Staging(_) => "StagingIOError",
            AppError::ProbeExecution(_) => "ProbeExecutionError",
            AppError::ProbeOutput(_) => "ProbeOutputError",
            AppError::NoStreamsFound(_) => "NoStreamsFound",
            AppError::TranscodeExecution(_) => "TranscodeExecutionError",
            AppError::Publish(_) => "PublishError",
            AppError::Database(_) => "DatabaseError",
            AppError::Persistence(_) => "PersistenceError",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "InternalError",
        }
    }

    /// Full internal message, including any source chain.
    pub fn detailed_message(&self) -> String {
        match self {
            AppError::InternalWithSource { message, source } => {
                format!("{}: {:#}", message, source)
            }
            other => other.to_string(),
        }
    }
}
