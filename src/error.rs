use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors raised while locating or decoding a year's playlist.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Unsupported year: {0}")]
    UnsupportedYear(String),

    #[error("Resource not found: {resource}")]
    ResourceNotFound { resource: String },

    #[error("Failed to read {resource}: {source}")]
    Read {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {resource}: {source}")]
    Decode {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    /// HTTP status a failed catalog load is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::UnsupportedYear(_) => StatusCode::BAD_REQUEST,
            CatalogError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::Read { .. } | CatalogError::Decode { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Errors returned by the JSON API handlers.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Catalog(e) => e.status_code(),
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
