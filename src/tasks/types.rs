use std::time::Duration;

pub const DEFAULT_LOOP_INTERVAL: Duration = Duration::from_secs(30);
/// Pause after posting a message before its reply is read
pub const WEBHOOK_READ_DELAY: Duration = Duration::from_secs(2);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
