use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::types::WebhookMessage;
use crate::{
    errors::{AppError, AppResult},
    tasks::types::WEBHOOK_READ_DELAY,
};

pub struct WebhookClient {
    client: Client,
    url: Url,
    read_delay: Duration,
}

impl WebhookClient {
    pub fn new(client: Client, url: Url) -> Self {
        Self {
            client,
            url,
            read_delay: WEBHOOK_READ_DELAY,
        }
    }

    /// Overrides the pause between sending a message and reading the reply.
    pub fn with_read_delay(mut self, read_delay: Duration) -> Self {
        self.read_delay = read_delay;
        self
    }

    /// Posts `{"text": text}`. The reply body is read after the read delay and
    /// discarded; a non-success status is logged but not treated as an error.
    pub async fn post_text(&self, text: &str) -> AppResult<()> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&WebhookMessage { text })
            .send()
            .await
            .map_err(AppError::WebhookRequest)?;

        tokio::time::sleep(self.read_delay).await;

        let status = response.status();
        let body = response.text().await.map_err(AppError::WebhookRequest)?;
        if status.is_success() {
            tracing::debug!(%status, bytes = body.len(), "Webhook accepted message");
        } else {
            tracing::warn!(%status, body = %body, "Webhook returned non-success status");
        }

        Ok(())
    }
}
