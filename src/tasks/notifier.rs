pub mod runner;
pub mod types;

pub use runner::Notifier;
pub use types::{CycleOutcome, HighWaterMark, NewEntries};
