pub mod notifier;
pub mod types;
