use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("LOG_LEVEL").ok(),
            std::env::var("LOG_FORMAT").ok(),
        )
    }

    fn from_values(log_level: Option<String>, log_format: Option<String>) -> Self {
        Self {
            log_level: log_level.unwrap_or_else(|| "info".to_string()),
            log_format: log_format
                .as_deref()
                .map(LogFormat::parse)
                .unwrap_or(LogFormat::Pretty),
        }
    }
}

/// Initialize structured logging and tracing.
///
/// Logs are written to stderr; stdout is reserved for the progress lines the
/// notifier prints each cycle. `RUST_LOG` overrides `LOG_LEVEL` when set.
pub fn init_logging() {
    let config = ObservabilityConfig::from_env();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_current_span(true)
                        .with_span_list(false),
                )
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_thread_ids(false),
                )
                .init();
        }
    }

    info!(
        service = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.log_level,
        log_format = ?config.log_format,
        "Logging initialized"
    );
}
