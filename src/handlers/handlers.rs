use crate::config::Config;
use crate::models::Year;
use crate::services::CatalogService;
use crate::state::GalleryState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tera::{Context, Tera};
use tracing::{error, info, warn};

pub struct AppState {
    pub config: Arc<Config>,
    pub catalog_service: CatalogService,
    pub tera: Tera,
}

#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    year: Option<String>,
    #[serde(default)]
    q: String,
}

#[derive(Debug, Deserialize)]
pub struct WatchQuery {
    year: Option<String>,
}

pub async fn health_check() -> &'static str {
    "OK"
}

/// Resolves the `year` query parameter, falling back to the configured default.
fn requested_year(state: &AppState, year: Option<&str>) -> Result<Year, StatusCode> {
    match year.filter(|label| !label.is_empty()) {
        None => Ok(state.config.default_year),
        Some(label) => label.parse::<Year>().map_err(|e| {
            warn!("Rejected year {:?}: {}", label, e);
            StatusCode::BAD_REQUEST
        }),
    }
}

fn render(tera: &Tera, template: &str, context: &Context) -> Result<Response, StatusCode> {
    match tera.render(template, context) {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) => {
            error!("Template error ({}): {}", template, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn gallery_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GalleryQuery>,
) -> Result<Response, StatusCode> {
    let year = requested_year(&state, params.year.as_deref())?;
    info!("Generating Gallery: {} (query {:?})", year, params.q);

    let mut gallery = GalleryState::new(state.config.default_year);
    gallery.load_year(&state.catalog_service, year).await;
    gallery.set_query(params.q);

    let mut context = Context::new();
    context.insert("gallery", &gallery.view());

    render(&state.tera, "index.html", &context)
}

pub async fn watch_handler(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    Query(params): Query<WatchQuery>,
) -> Result<Response, StatusCode> {
    let year = requested_year(&state, params.year.as_deref())?;

    let mut gallery = GalleryState::new(state.config.default_year);
    gallery.load_year(&state.catalog_service, year).await;

    if let Some(e) = gallery.failure() {
        error!("Failed to load catalog for {}: {}", year, e);

        let mut context = Context::new();
        context.insert("year", &year);
        context.insert("message", &e.to_string());

        let page = render(&state.tera, "error.html", &context)?;
        return Ok((e.status_code(), page).into_response());
    }

    match gallery.select(&video_id) {
        Some(playback) => {
            info!("Generating Player Page: {} ({})", video_id, year);

            let mut context = Context::new();
            context.insert("playback", &playback);

            render(&state.tera, "watch.html", &context)
        }
        None => {
            error!("Video not found: {} in {}", video_id, year);
            Err(StatusCode::NOT_FOUND)
        }
    }
}
