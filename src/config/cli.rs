use crate::config::toml_config::TomlConfig;
use crate::config::ServiceConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "product-scraper")]
#[command(about = "Scrapes product listings and details from an online shop")]
pub struct CliConfig {
    #[arg(long, global = true, env = "PRODUCT_SCRAPER_CONFIG", help = "Path to a TOML config file")]
    pub config: Option<String>,

    #[arg(long, global = true, env = "BIND_HOST", help = "Address the HTTP service binds to")]
    pub host: Option<String>,

    #[arg(long, global = true, env = "PORT", help = "Port the HTTP service listens on")]
    pub port: Option<u16>,

    #[arg(long, global = true, env = "AGENTQL_API_KEY", hide_env_values = true)]
    pub agentql_api_key: Option<String>,

    #[arg(long, global = true, env = "AGENTQL_ENDPOINT")]
    pub agentql_endpoint: Option<String>,

    #[arg(long, global = true, env = "SEARCH_BASE_URL")]
    pub search_base_url: Option<String>,

    #[arg(long, global = true, env = "CONCURRENT_REQUESTS")]
    pub concurrent_requests: Option<usize>,

    #[arg(long, global = true, env = "REQUEST_TIMEOUT_SECONDS")]
    pub request_timeout: Option<u64>,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, short, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP service (default)
    Serve,
    /// Scrape a product listing page once
    Scrape {
        #[arg(long)]
        url: String,

        #[arg(long, value_delimiter = ',')]
        existing: Vec<String>,

        #[arg(long, help = "Write results to a .json or .csv file instead of stdout")]
        output: Option<String>,
    },
    /// Search the shop by keyword and scrape the results once
    Search {
        #[arg(long)]
        keyword: String,

        #[arg(long, value_delimiter = ',')]
        existing: Vec<String>,

        #[arg(long, help = "Write results to a .json or .csv file instead of stdout")]
        output: Option<String>,
    },
}

impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }

    /// 預設值 < TOML 檔 < CLI / 環境變數
    pub fn resolve(&self) -> Result<ServiceConfig> {
        let mut config = ServiceConfig::default();

        if let Some(path) = &self.config {
            TomlConfig::from_file(path)?.apply_to(&mut config);
        }

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(api_key) = &self.agentql_api_key {
            config.agentql_api_key = Some(api_key.clone());
        }
        if let Some(endpoint) = &self.agentql_endpoint {
            config.agentql_endpoint = endpoint.clone();
        }
        if let Some(base_url) = &self.search_base_url {
            config.search_base_url = base_url.clone();
        }
        if let Some(concurrent) = self.concurrent_requests {
            config.concurrent_requests = concurrent;
        }
        if let Some(timeout) = self.request_timeout {
            config.request_timeout_seconds = timeout;
        }
        if self.json_logs {
            config.log_format = "json".to_string();
        }
        if self.verbose {
            config.verbose = true;
        }

        Ok(config)
    }
}
