use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Extraction error: {message}")]
    ExtractionError { message: String },

    #[error("Upstream service returned {status}: {message}")]
    UpstreamError { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScrapeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScrapeError::ApiError(_) | ScrapeError::UpstreamError { .. } => ErrorCategory::Network,
            ScrapeError::CsvError(_)
            | ScrapeError::SerializationError(_)
            | ScrapeError::ExtractionError { .. }
            | ScrapeError::ValidationError { .. } => ErrorCategory::Data,
            ScrapeError::UrlError(_)
            | ScrapeError::ConfigError { .. }
            | ScrapeError::ConfigValidationError { .. }
            | ScrapeError::InvalidConfigValueError { .. }
            | ScrapeError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ScrapeError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路錯誤通常重試即可
            ScrapeError::ApiError(_) => ErrorSeverity::Medium,
            ScrapeError::UpstreamError { status, .. } if *status == 429 || *status >= 500 => {
                ErrorSeverity::Medium
            }
            ScrapeError::UpstreamError { .. } => ErrorSeverity::High,
            ScrapeError::ExtractionError { .. }
            | ScrapeError::ValidationError { .. }
            | ScrapeError::SerializationError(_)
            | ScrapeError::CsvError(_) => ErrorSeverity::High,
            ScrapeError::UrlError(_)
            | ScrapeError::ConfigError { .. }
            | ScrapeError::ConfigValidationError { .. }
            | ScrapeError::InvalidConfigValueError { .. }
            | ScrapeError::MissingConfigError { .. }
            | ScrapeError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 依錯誤類型給出修復建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScrapeError::ApiError(_) => "Check network connectivity and retry the request",
            ScrapeError::UpstreamError { status: 401 | 403, .. } => {
                "Check that AGENTQL_API_KEY is set to a valid key"
            }
            ScrapeError::UpstreamError { status: 429, .. } => {
                "The page query service is rate limiting; lower --concurrent-requests or retry later"
            }
            ScrapeError::UpstreamError { .. } => "Retry later; the page query service is unavailable",
            ScrapeError::ExtractionError { .. } => {
                "The page layout may have changed; verify the URL points to a product listing"
            }
            ScrapeError::ValidationError { .. } => "Fix the request parameters and try again",
            ScrapeError::CsvError(_) | ScrapeError::SerializationError(_) => {
                "Try exporting with a different output format"
            }
            ScrapeError::IoError(_) => "Check file permissions and available disk space",
            ScrapeError::UrlError(_)
            | ScrapeError::ConfigError { .. }
            | ScrapeError::ConfigValidationError { .. }
            | ScrapeError::InvalidConfigValueError { .. }
            | ScrapeError::MissingConfigError { .. } => {
                "Review the configuration file and command line options"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach a remote service: {}", self),
            ErrorCategory::Data => format!("Could not extract product data: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
