pub mod client;
pub mod types;

pub use client::FeedClient;
pub use types::{FeedEntry, RecentChange};
