use std::fmt;

use crate::{
    errors::AppResult,
    feed::{FeedEntry, RecentChange},
};

/// Highest change id already handed to the notifier. Starts at zero, so the
/// first fetch of a run treats everything in the feed as new.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct HighWaterMark(u64);

impl HighWaterMark {
    pub fn new(rcid: u64) -> Self {
        Self(rcid)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn is_new(self, rcid: u64) -> bool {
        rcid > self.0
    }
}

impl fmt::Display for HighWaterMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entries to notify, oldest first, and the mark to use on the next cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntries {
    pub entries: Vec<FeedEntry>,
    pub mark: HighWaterMark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Every new entry was delivered.
    Completed(HighWaterMark),
    /// Shutdown was requested part way through.
    Interrupted,
}

/// Keeps the changes of a newest-first `raw` list whose id is above `mark`,
/// returned oldest first.
///
/// Only kept changes must carry title, timestamp and user; records at or
/// below the mark are dropped on `rcid` alone.
///
/// When anything is kept, the next mark is the id of `raw[0]`, not the maximum
/// of the kept ids. The two agree for a newest-first feed; an out-of-order
/// feed can make them differ.
pub fn select_new_entries(raw: Vec<RecentChange>, mark: HighWaterMark) -> AppResult<NewEntries> {
    let head = raw.first().map(|change| HighWaterMark::new(change.rcid));

    let mut entries = raw
        .into_iter()
        .filter(|change| mark.is_new(change.rcid))
        .map(RecentChange::into_entry)
        .collect::<AppResult<Vec<FeedEntry>>>()?;
    entries.reverse();

    let mark = match head {
        Some(head) if !entries.is_empty() => head,
        _ => mark,
    };

    Ok(NewEntries { entries, mark })
}
