use serde::Deserialize;

use crate::errors::{AppError, AppResult};

/// Body of a `list=recentchanges` query
#[derive(Debug, Deserialize)]
pub struct RecentChangesResponse {
    pub query: RecentChangesQuery,
}

#[derive(Debug, Deserialize)]
pub struct RecentChangesQuery {
    pub recentchanges: Vec<RecentChange>,
}

impl RecentChangesResponse {
    pub fn into_changes(self) -> Vec<RecentChange> {
        self.query.recentchanges
    }
}

/// A change record as the feed sends it. Only `rcid` is always present:
/// MediaWiki drops `user` (sending `userhidden`) or `title` on revisions whose
/// details were suppressed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecentChange {
    pub rcid: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

impl RecentChange {
    /// Requires the fields a notification is built from.
    pub fn into_entry(self) -> AppResult<FeedEntry> {
        let rcid = self.rcid;
        let missing = |field| AppError::IncompleteChange { rcid, field };

        Ok(FeedEntry {
            rcid,
            title: self.title.ok_or_else(|| missing("title"))?,
            timestamp: self.timestamp.ok_or_else(|| missing("timestamp"))?,
            user: self.user.ok_or_else(|| missing("user"))?,
        })
    }
}

/// A change that will be notified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub rcid: u64,
    pub title: String,
    pub timestamp: String,
    pub user: String,
}

impl FeedEntry {
    /// `2021-01-01T12:00:00Z` becomes `2021-01-01 12:00:00`.
    pub fn display_timestamp(&self) -> String {
        self.timestamp.replace('T', " ").replace('Z', "")
    }
}
