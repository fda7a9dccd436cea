//! Route configuration and setup.

use crate::api_doc::ApiDoc;
use crate::auth::middleware::auth_middleware;
use crate::constants::{ASSETS_PATH, THUMBNAIL_GET_PATH, THUMBNAIL_UPLOAD_PATH, VIDEO_UPLOAD_PATH};
use crate::handlers;
use crate::state::AppState;
use crate::utils::upload::body_limit;
use axum::{
    extract::DefaultBodyLimit,
    handler::Handler,
    routing::{get, post, MethodRouter},
    Json, Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router {
    let auth_state = Arc::new(state.auth.clone());
    let limits = state.media.limits;

    let protected_routes = Router::new()
        .route(
            THUMBNAIL_UPLOAD_PATH,
            upload_route(handlers::thumbnail_upload::upload_thumbnail, limits.thumbnail_max_bytes),
        )
        .route(
            VIDEO_UPLOAD_PATH,
            upload_route(handlers::video_upload::upload_video, limits.video_max_bytes),
        )
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    let public_routes = Router::new()
        .route(THUMBNAIL_GET_PATH, get(handlers::thumbnail_get::get_thumbnail))
        .route("/health", get(handlers::health::health_check))
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest_service(ASSETS_PATH, ServeDir::new(&state.media.assets_root));

    public_routes
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST route whose body may carry one file of at most `max_file_bytes`.
///
/// The body limit leaves room for multipart framing; the field itself is held
/// to `max_file_bytes` while it is read. Overruns reach the multipart parser and
/// come back as a JSON 413.
fn upload_route<H, T>(handler: H, max_file_bytes: usize) -> MethodRouter<Arc<AppState>>
where
    H: Handler<T, Arc<AppState>>,
    T: 'static,
{
    post(handler).layer(DefaultBodyLimit::max(body_limit(max_file_bytes)))
}
