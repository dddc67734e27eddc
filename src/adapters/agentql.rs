use crate::config::ServiceConfig;
use crate::domain::ports::{PageQuery, QueryOptions};
use crate::utils::error::{Result, ScrapeError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 遠端頁面查詢服務 (AgentQL REST API) 的客戶端
#[derive(Debug, Clone)]
pub struct AgentQlClient {
    client: Client,
    endpoint: String,
    api_key: String,
    mode: String,
}

#[derive(Debug, Serialize)]
struct QueryDataRequest<'a> {
    url: &'a str,
    query: &'a str,
    params: QueryDataParams<'a>,
}

#[derive(Debug, Serialize)]
struct QueryDataParams<'a> {
    mode: &'a str,
    wait_for: u32,
    is_scroll_to_bottom_enabled: bool,
    is_screenshot_enabled: bool,
}

#[derive(Debug, Deserialize)]
struct QueryDataResponse {
    data: Option<serde_json::Value>,
    #[serde(default)]
    metadata: Option<serde_json::Value>,
}

impl AgentQlClient {
    pub fn new(endpoint: String, api_key: String, mode: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("product-scraper/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            mode,
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Self::new(
            config.agentql_endpoint.clone(),
            config.api_key()?.to_string(),
            config.query_mode.clone(),
            Duration::from_secs(config.request_timeout_seconds),
        )
    }
}

#[async_trait]
impl PageQuery for AgentQlClient {
    async fn query_data(
        &self,
        url: &str,
        query: &str,
        options: QueryOptions,
    ) -> Result<serde_json::Value> {
        let body = QueryDataRequest {
            url,
            query,
            params: QueryDataParams {
                mode: &self.mode,
                wait_for: 0,
                is_scroll_to_bottom_enabled: options.scroll_to_bottom,
                is_screenshot_enabled: false,
            },
        };

        tracing::debug!("Querying page data: {}", url);
        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-Key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Page query response status: {}", status);

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ScrapeError::UpstreamError {
                status: status.as_u16(),
                message,
            });
        }

        let payload: QueryDataResponse = response.json().await?;
        if let Some(request_id) = payload
            .metadata
            .as_ref()
            .and_then(|m| m.get("request_id"))
            .and_then(|id| id.as_str())
        {
            tracing::debug!("Page query request id: {}", request_id);
        }

        match payload.data {
            Some(data @ serde_json::Value::Object(_)) => Ok(data),
            Some(other) => Err(ScrapeError::ExtractionError {
                message: format!("expected an object from page query, got {}", other),
            }),
            None => Err(ScrapeError::ExtractionError {
                message: format!("page query returned no data for {}", url),
            }),
        }
    }
}
