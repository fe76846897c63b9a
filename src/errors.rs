use thiserror::Error;

/// Application-wide error types. None of these are retried: a failure in any
/// cycle ends the notifier loop.
#[derive(Debug, Error)]
pub enum AppError {
    // Configuration
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),
    #[error("invalid {var}: {message}")]
    InvalidConfig { var: &'static str, message: String },

    // HTTP client setup
    #[error("unable to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    // Feed endpoint
    #[error("network error fetching feed")]
    FeedRequest(#[source] reqwest::Error),
    #[error("feed returned non-success status {status}")]
    FeedStatus { status: u16 },
    #[error("unable to parse feed - invalid format")]
    FeedParse(#[from] serde_json::Error),
    #[error("change {rcid} is missing its {field}")]
    IncompleteChange { rcid: u64, field: &'static str },

    // Webhook endpoint
    #[error("network error posting to webhook")]
    WebhookRequest(#[source] reqwest::Error),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn invalid_config(var: &'static str, message: impl Into<String>) -> Self {
        AppError::InvalidConfig {
            var,
            message: message.into(),
        }
    }

    /// Errors raised before the notifier loop starts.
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            AppError::MissingEnv(_) | AppError::InvalidConfig { .. } | AppError::HttpClient(_)
        )
    }
}
