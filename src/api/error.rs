//! HTTP error mapping. Bodies use the `{"detail": "..."}` shape clients of the
//! scraping API already parse.

use crate::utils::error::ScrapeError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug)]
pub enum ApiError {
    /// Malformed or missing request input
    Unprocessable(String),
    /// Scrape failed
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ScrapeError> for ApiError {
    fn from(error: ScrapeError) -> Self {
        match error {
            ScrapeError::InvalidConfigValueError { .. } | ScrapeError::ValidationError { .. } => {
                ApiError::Unprocessable(error.to_string())
            }
            other => {
                tracing::error!(
                    "Scrape request failed: {} (Category: {:?}, Severity: {:?})",
                    other,
                    other.category(),
                    other.severity()
                );
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::Unprocessable(detail) | ApiError::Internal(detail) => detail,
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}
