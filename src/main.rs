use std::{error::Error as StdError, process::ExitCode};

use clap::Parser;
use dotenvy::dotenv;
use rcnotify::{
    observability, shutdown,
    tasks::notifier::runner,
    AppError, AppResult, Config, Notifier,
};

/// Posts new wiki recent changes to a chat webhook.
///
/// Configured through WMCS_WIKIMEDIA_URL, WMCS_SLACK_URL and WMCS_LOOP_TIME.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let _args = Args::parse();

    observability::init_logging();

    let result = run().await;
    if let Err(e) = &result {
        if e.is_startup() {
            tracing::error!(error = %e, "Failed to start");
        } else {
            tracing::error!(error = %e, "Notifier stopped on error");
        }
        report_error(e);
    }

    ExitCode::from(exit_status(&result))
}

/// 0 after a signal-driven shutdown, 1 for any error.
fn exit_status(result: &AppResult<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

async fn run() -> AppResult<()> {
    let config = Config::from_env()?;
    let notifier = Notifier::from_config(&config)?;

    let (trigger, token) = shutdown::channel();
    tokio::spawn(trigger.trigger_on_signal());

    runner::start(notifier, token).await
}

fn report_error(err: &AppError) {
    eprintln!("Error: {err}");
    let mut source: Option<&dyn StdError> = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
