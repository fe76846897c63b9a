pub mod config;
pub mod errors;
pub mod feed;
pub mod observability;
pub mod shutdown;
pub mod tasks;
#[cfg(test)]
pub mod test_helpers;
pub mod webhook;

pub use config::Config;
pub use errors::{AppError, AppResult};
pub use tasks::notifier::Notifier;
