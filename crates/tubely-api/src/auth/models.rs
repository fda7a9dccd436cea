use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tubely_core::AppError;
use uuid::Uuid;

use crate::error::HttpAppError;

/// Authenticated caller, placed in request extensions by the auth middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
}

// Read straight from parts so it composes with the `Multipart` body extractor.
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Principal>().copied().ok_or_else(|| {
            HttpAppError(AppError::MissingCredential(
                "no authenticated principal on request".to_string(),
            ))
        })
    }
}
