use crate::error::AppResult;
use crate::handlers::handlers::AppState;
use crate::models::{CatalogResponse, Year, YearsResponse};
use crate::services::search;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

pub async fn years_handler(State(state): State<Arc<AppState>>) -> Json<YearsResponse> {
    Json(YearsResponse {
        years: Year::ALL.to_vec(),
        default: state.config.default_year,
    })
}

pub async fn catalog_handler(
    State(state): State<Arc<AppState>>,
    Path(year): Path<String>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<CatalogResponse>> {
    let year: Year = year.parse()?;
    info!("Generating Catalog: {} (query {:?})", year, params.q);

    let catalog = state.catalog_service.load(year).await?;
    let items = search::filter(&catalog.items, &params.q)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(CatalogResponse {
        year: catalog.year,
        query: params.q,
        total: catalog.items.len(),
        items,
    }))
}
