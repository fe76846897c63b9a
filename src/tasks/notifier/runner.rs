use std::time::Duration;

use reqwest::Client;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use super::types::{select_new_entries, CycleOutcome, HighWaterMark, NewEntries};
use crate::{
    config::Config,
    errors::{AppError, AppResult},
    feed::{FeedClient, FeedEntry},
    shutdown::Shutdown,
    tasks::types::{REQUEST_TIMEOUT, USER_AGENT},
    webhook::WebhookClient,
};

pub struct Notifier {
    feed: FeedClient,
    webhook: WebhookClient,
    loop_interval: Duration,
}

impl Notifier {
    pub fn new(feed: FeedClient, webhook: WebhookClient, loop_interval: Duration) -> Self {
        Self {
            feed,
            webhook,
            loop_interval,
        }
    }

    /// Builds both clients over one shared HTTP client.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(AppError::HttpClient)?;

        Ok(Self::new(
            FeedClient::new(http_client.clone(), config.feed_url.clone()),
            WebhookClient::new(http_client, config.webhook_url.clone()),
            config.loop_interval,
        ))
    }

    pub fn loop_interval(&self) -> Duration {
        self.loop_interval
    }

    pub async fn fetch_new_entries(&self, mark: HighWaterMark) -> AppResult<NewEntries> {
        let raw = self.feed.fetch_recent_changes().await?;
        let fetched = raw.len();
        let new = select_new_entries(raw, mark)?;
        info!(
            fetched,
            new = new.entries.len(),
            mark = %new.mark,
            "Checked feed {}",
            self.feed.url()
        );
        Ok(new)
    }

    pub async fn notify(&self, entry: &FeedEntry) -> AppResult<()> {
        let message = format_message(entry);
        self.webhook.post_text(&message).await?;
        info!(rcid = entry.rcid, title = %entry.title, "Notification sent");
        Ok(())
    }

    /// Fetches once and delivers every new entry in order. Shutdown is checked
    /// before the fetch and before each delivery, and cancels whichever of
    /// them is in flight.
    pub async fn run_cycle(
        &self,
        mark: HighWaterMark,
        shutdown: &mut Shutdown,
    ) -> AppResult<CycleOutcome> {
        let NewEntries { entries, mark } =
            match shutdown.run_until(self.fetch_new_entries(mark)).await {
                Some(fetched) => fetched?,
                None => return Ok(CycleOutcome::Interrupted),
            };

        for entry in &entries {
            match shutdown.run_until(self.notify(entry)).await {
                Some(sent) => sent?,
                None => return Ok(CycleOutcome::Interrupted),
            }
            println!("Sending message");
        }

        Ok(CycleOutcome::Completed(mark))
    }
}

/// `**<title>** was edited on **<date time>** by <user>`
pub fn format_message(entry: &FeedEntry) -> String {
    format!(
        "**{}** was edited on **{}** by {}",
        entry.title,
        entry.display_timestamp(),
        entry.user
    )
}

/// Polls forever, starting from an empty mark. Returns `Ok(())` once shutdown
/// is requested and the first error otherwise.
pub async fn start(notifier: Notifier, shutdown: Shutdown) -> AppResult<()> {
    run_from(notifier, HighWaterMark::default(), shutdown).await
}

async fn run_from(
    notifier: Notifier,
    mut mark: HighWaterMark,
    mut shutdown: Shutdown,
) -> AppResult<()> {
    info!(
        interval_secs = notifier.loop_interval().as_secs(),
        "Notifier started"
    );

    while !shutdown.is_triggered() {
        println!("Looping...");

        let span = info_span!("cycle", cycle_id = %Uuid::new_v4(), mark = %mark);
        match notifier
            .run_cycle(mark, &mut shutdown)
            .instrument(span)
            .await?
        {
            CycleOutcome::Completed(next) => mark = next,
            CycleOutcome::Interrupted => break,
        }

        if shutdown
            .run_until(tokio::time::sleep(notifier.loop_interval()))
            .await
            .is_none()
        {
            break;
        }
    }

    info!(mark = %mark, "Notifier stopped");
    Ok(())
}
