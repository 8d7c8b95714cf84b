use crate::handlers::{api_handlers, handlers, AppState};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Builds the gallery router: HTML pages, the JSON API and static assets.
pub fn create_router(state: Arc<AppState>) -> Router {
    let public_dir = state.config.public_dir.clone();

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/", get(handlers::gallery_handler))
        .route("/watch/:video_id", get(handlers::watch_handler))
        .route("/api/years", get(api_handlers::years_handler))
        .route("/api/catalog/:year", get(api_handlers::catalog_handler))
        .nest_service("/public", ServeDir::new(public_dir))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
