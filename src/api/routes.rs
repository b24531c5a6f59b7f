use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main router: the application shell, its assets and the JSON API
pub fn create_router(state: AppState) -> Router {
    let static_dir = Path::new(&state.config.static_dir);
    let shell = ServeFile::new(static_dir.join("index.html"));
    let assets = ServeDir::new(static_dir);

    Router::new()
        .route_service("/", shell)
        .nest_service("/static", assets)
        .route("/health", get(handlers::health_check))
        // Categories
        .route("/api/categories", get(handlers::get_categories))
        // Sessions
        .route("/api/create_session", post(handlers::create_session))
        .route("/api/update_session", post(handlers::update_session))
        .route("/api/reset_session", post(handlers::reset_session))
        // Recommendations
        .route("/api/recommendations", get(handlers::get_recommendations))
        .route("/tag/:tag_id", get(handlers::tag_placeholder))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
