use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.server.max_body_size;
    let cors = cors_layer(&state.config.server.cors_origins);

    let mut router = Router::new()
        // Enrollment flow
        .route("/enroll", post(handlers::enroll))
        .route("/saveStudentInfo", post(handlers::save_student_info))
        .route("/getEnrollment", get(handlers::get_enrollment))
        .route("/status", get(handlers::status))
        // Internal
        .route("/_internal/health", get(handlers::health));

    if state.media.is_some() {
        router = router.route("/media/*path", get(handlers::serve_media));
    }

    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Any origin when none are configured, otherwise exactly the listed ones.
///
/// `Config::validate` rejects unparseable origins. Should one get through
/// anyway it is skipped, and a list left empty denies every cross-origin
/// request rather than widening to `*`.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    if parsed.is_empty() {
        tracing::warn!("No valid CORS origins configured; cross-origin requests are denied");
    }

    layer.allow_origin(parsed)
}
