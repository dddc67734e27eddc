pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::logger::LOG_FORMATS;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_AGENTQL_ENDPOINT: &str = "https://api.agentql.com/v1/query-data";
pub const DEFAULT_QUERY_MODE: &str = "fast";
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://demandvape.com/index.php";
pub const DEFAULT_SEARCH_CATEGORY_ID: &str = "1096";
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// 合併 CLI、環境變數與 TOML 之後的最終設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    #[serde(skip_serializing)]
    pub agentql_api_key: Option<String>,
    pub agentql_endpoint: String,
    pub query_mode: String,
    pub search_base_url: String,
    pub search_category_id: String,
    pub concurrent_requests: usize,
    pub request_timeout_seconds: u64,
    pub log_format: String,
    pub verbose: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            agentql_api_key: None,
            agentql_endpoint: DEFAULT_AGENTQL_ENDPOINT.to_string(),
            query_mode: DEFAULT_QUERY_MODE.to_string(),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            search_category_id: DEFAULT_SEARCH_CATEGORY_ID.to_string(),
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            log_format: "text".to_string(),
            verbose: false,
        }
    }
}

impl ServiceConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 取得 API key；缺少時回傳 MissingConfigError
    pub fn api_key(&self) -> Result<&str> {
        validation::validate_required_field("agentql.api_key", &self.agentql_api_key)
            .map(String::as_str)
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.host)?;
        validation::validate_range("server.port", self.port, 1, u16::MAX)?;
        validation::validate_non_empty_string("agentql.api_key", self.api_key()?)?;
        validation::validate_url("agentql.endpoint", &self.agentql_endpoint)?;
        validation::validate_url("scrape.search_base_url", &self.search_base_url)?;
        validation::validate_non_empty_string("scrape.category_id", &self.search_category_id)?;
        validation::validate_positive_number(
            "scrape.concurrent_requests",
            self.concurrent_requests,
            1,
        )?;
        validation::validate_range("agentql.timeout_seconds", self.request_timeout_seconds, 1, 600)?;

        if !LOG_FORMATS.contains(&self.log_format.as_str()) {
            return Err(ScrapeError::InvalidConfigValueError {
                field: "logging.format".to_string(),
                value: self.log_format.clone(),
                reason: format!("Must be one of: {}", LOG_FORMATS.join(", ")),
            });
        }
        Ok(())
    }
}

impl ConfigProvider for ServiceConfig {
    fn search_base_url(&self) -> &str {
        &self.search_base_url
    }

    fn search_category_id(&self) -> &str {
        &self.search_category_id
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}
