pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{agentql::AgentQlClient, storage::LocalStorage};
pub use crate::api::{create_router, AppState};
pub use crate::config::{cli::CliConfig, ServiceConfig};
pub use crate::core::{scrape::ScrapeEngine, ProductBase, ProductDetails, SearchRequest};
pub use crate::utils::error::{Result, ScrapeError};
