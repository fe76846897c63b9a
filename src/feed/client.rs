use reqwest::{header, Client};
use url::Url;

use super::types::{RecentChange, RecentChangesResponse};
use crate::errors::{AppError, AppResult};

pub struct FeedClient {
    client: Client,
    url: Url,
}

impl FeedClient {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetches the current change list, newest first as the feed returns it.
    pub async fn fetch_recent_changes(&self) -> AppResult<Vec<RecentChange>> {
        let response = self
            .client
            .get(self.url.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(AppError::FeedRequest)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Got non-success response for feed {}: {}", self.url, status);
            return Err(AppError::FeedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(AppError::FeedRequest)?;
        let parsed: RecentChangesResponse = serde_json::from_str(&body)?;
        let changes = parsed.into_changes();
        tracing::debug!(count = changes.len(), "Fetched recent changes");

        Ok(changes)
    }
}
