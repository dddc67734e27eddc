use clap::Parser;
use product_scraper::adapters::export::{render_products, ExportFormat};
use product_scraper::config::cli::Command;
use product_scraper::core::Storage;
use product_scraper::utils::error::ErrorSeverity;
use product_scraper::utils::validation::{self, Validate};
use product_scraper::utils::logger;
use product_scraper::{
    api, AgentQlClient, AppState, CliConfig, LocalStorage, ProductDetails, Result, ScrapeEngine,
    ServiceConfig,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(&config.log_format, config.verbose);
    tracing::info!("Starting product-scraper v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &cli.config {
        tracing::info!("📄 Loaded config file: {}", path);
    }
    tracing::debug!(
        "Resolved config: {}",
        serde_json::to_string(&config).unwrap_or_default()
    );

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command(), config).await {
        tracing::error!(
            "❌ product-scraper failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 依錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(command: Command, config: ServiceConfig) -> Result<()> {
    let page_query = Arc::new(AgentQlClient::from_config(&config)?);
    let engine = ScrapeEngine::new(page_query, &config)?;

    match command {
        Command::Serve => api::serve(&config, AppState::new(engine)).await,
        Command::Scrape {
            url,
            existing,
            output,
        } => {
            validation::validate_url("url", &url)?;
            let products = engine.get_names_and_fetch(&url, &existing).await?;
            write_output(&products, output.as_deref()).await
        }
        Command::Search {
            keyword,
            existing,
            output,
        } => {
            let products = engine.search_and_scrape(&keyword, &existing).await?;
            write_output(&products, output.as_deref()).await
        }
    }
}

async fn write_output(products: &[ProductDetails], output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            let format = ExportFormat::from_path(path)?;
            let data = render_products(format, products)?;
            LocalStorage::new(".")
                .write_file(path, &data)
                .await?;
            tracing::info!("📁 {} products saved to: {}", products.len(), path);
            println!("📁 {} products saved to: {}", products.len(), path);
        }
        None => {
            let json = serde_json::to_string_pretty(products)?;
            println!("{}", json);
        }
    }
    Ok(())
}
