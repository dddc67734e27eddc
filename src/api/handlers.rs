use super::error::ApiError;
use super::AppState;
use crate::domain::model::{ProductDetails, ScrapeParams, SearchRequest};
use crate::utils::error::ScrapeError;
use crate::utils::validation;
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: i64,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: state.started_at,
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
    })
}

/// POST /scrape?url=...
///
/// The body is optional; when present it is a JSON array of product names
/// that are already known and should not be fetched again.
pub async fn scrape(
    State(state): State<AppState>,
    params: Result<Query<ScrapeParams>, QueryRejection>,
    body: Bytes,
) -> Result<Json<Vec<ProductDetails>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::Unprocessable(e.body_text()))?;
    validation::validate_url("url", &params.url)?;
    let existing_product_names = parse_existing_names(&body)?;

    tracing::info!(
        "📥 /scrape {} ({} known products)",
        params.url,
        existing_product_names.len()
    );

    let products = state
        .engine
        .get_names_and_fetch(&params.url, &existing_product_names)
        .await?;
    Ok(Json(products))
}

/// POST /search-and-scrape
pub async fn search_and_scrape(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Vec<ProductDetails>>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::Unprocessable(e.body_text()))?;

    tracing::info!(
        "📥 /search-and-scrape '{}' ({} known products)",
        request.search_keyword,
        request.existing_product_names.len()
    );

    let products = state
        .engine
        .search_and_scrape(&request.search_keyword, &request.existing_product_names)
        .await?;
    Ok(Json(products))
}

fn parse_existing_names(body: &[u8]) -> Result<Vec<String>, ScrapeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    serde_json::from_slice(body).map_err(|e| ScrapeError::ValidationError {
        message: format!("body must be a JSON array of product names: {}", e),
    })
}
