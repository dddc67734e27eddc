use crate::config::ServiceConfig;
use crate::utils::error::{Result, ScrapeError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub agentql: Option<AgentQlSection>,
    pub scrape: Option<ScrapeSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentQlSection {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub mode: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeSection {
    pub search_base_url: Option<String>,
    pub category_id: Option<String>,
    pub concurrent_requests: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub format: Option<String>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScrapeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScrapeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${AGENTQL_API_KEY})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScrapeError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 套用到既有設定上，只覆蓋檔案中有寫的欄位
    pub fn apply_to(&self, config: &mut ServiceConfig) {
        if let Some(server) = &self.server {
            if let Some(host) = &server.host {
                config.host = host.clone();
            }
            if let Some(port) = server.port {
                config.port = port;
            }
        }

        if let Some(agentql) = &self.agentql {
            if let Some(api_key) = &agentql.api_key {
                // 未替換的 ${VAR} 視為沒有設定
                if !api_key.starts_with("${") {
                    config.agentql_api_key = Some(api_key.clone());
                }
            }
            if let Some(endpoint) = &agentql.endpoint {
                config.agentql_endpoint = endpoint.clone();
            }
            if let Some(mode) = &agentql.mode {
                config.query_mode = mode.clone();
            }
            if let Some(timeout) = agentql.timeout_seconds {
                config.request_timeout_seconds = timeout;
            }
        }

        if let Some(scrape) = &self.scrape {
            if let Some(base_url) = &scrape.search_base_url {
                config.search_base_url = base_url.clone();
            }
            if let Some(category_id) = &scrape.category_id {
                config.search_category_id = category_id.clone();
            }
            if let Some(concurrent) = scrape.concurrent_requests {
                config.concurrent_requests = concurrent;
            }
        }

        if let Some(logging) = &self.logging {
            if let Some(format) = &logging.format {
                config.log_format = format.clone();
            }
            if let Some(verbose) = logging.verbose {
                config.verbose = verbose;
            }
        }
    }
}
