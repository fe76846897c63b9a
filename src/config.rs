use std::{env, time::Duration};

use url::Url;

use crate::{
    errors::{AppError, AppResult},
    tasks::types::DEFAULT_LOOP_INTERVAL,
};

pub const FEED_URL_VAR: &str = "WMCS_WIKIMEDIA_URL";
pub const WEBHOOK_URL_VAR: &str = "WMCS_SLACK_URL";
pub const LOOP_TIME_VAR: &str = "WMCS_LOOP_TIME";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Endpoint returning `{"query": {"recentchanges": [...]}}`
    pub feed_url: Url,
    /// Endpoint accepting `POST {"text": ...}`
    pub webhook_url: Url,
    /// Sleep between cycles
    pub loop_interval: Duration,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source. `from_env` is this over
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let feed_url = required_url(&lookup, FEED_URL_VAR)?;
        let webhook_url = required_url(&lookup, WEBHOOK_URL_VAR)?;

        let loop_interval = match lookup(LOOP_TIME_VAR) {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    AppError::invalid_config(
                        LOOP_TIME_VAR,
                        format!("expected a non-negative number of seconds, got {raw:?} ({e})"),
                    )
                })?;
                tracing::info!("Using loop interval from {LOOP_TIME_VAR}: {secs}s");
                Duration::from_secs(secs)
            }
            None => {
                tracing::info!(
                    "Using default loop interval: {}s",
                    DEFAULT_LOOP_INTERVAL.as_secs()
                );
                DEFAULT_LOOP_INTERVAL
            }
        };

        Ok(Config {
            feed_url,
            webhook_url,
            loop_interval,
        })
    }
}

fn required_url<F>(lookup: &F, var: &'static str) -> AppResult<Url>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(var).ok_or(AppError::MissingEnv(var))?;
    let url = Url::parse(raw.trim())
        .map_err(|e| AppError::invalid_config(var, format!("not a valid URL ({e})")))?;

    match url.scheme() {
        "http" | "https" => {
            // Webhook URLs embed secrets, so only the host is logged.
            tracing::info!("Using {var} for host {}", url.host_str().unwrap_or("?"));
            Ok(url)
        }
        other => Err(AppError::invalid_config(
            var,
            format!("unsupported scheme {other:?}, expected http or https"),
        )),
    }
}
