use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::auth::jwt::bearer_token;
use crate::auth::models::Principal;
use crate::error::HttpAppError;
use crate::state::AuthState;

/// Resolve the bearer token to a [`Principal`] before any handler or path parsing runs.
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let user_id = match bearer_token(request.headers()).and_then(|t| auth_state.jwt.validate(t)) {
        Ok(user_id) => user_id,
        Err(err) => return HttpAppError(err).into_response(),
    };

    request.extensions_mut().insert(Principal { user_id });

    next.run(request).await
}
