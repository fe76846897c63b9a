use std::future::Future;

use tokio::{signal, sync::watch};

/// OS signal that ends the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Interrupt,
    Terminate,
}

#[cfg(unix)]
async fn next_signal() -> Signal {
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
        .expect("Failed to install SIGTERM handler");

    tokio::select! {
        res = signal::ctrl_c() => {
            res.expect("Failed to install Ctrl+C handler");
            Signal::Interrupt
        }
        _ = terminate.recv() => Signal::Terminate,
    }
}

#[cfg(not(unix))]
async fn next_signal() -> Signal {
    signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    Signal::Interrupt
}

/// Creates a linked trigger/token pair.
pub fn channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, Shutdown { rx })
}

/// Sending half, owned by whoever listens for signals.
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// Fires the token on the first SIGINT or SIGTERM and reports which one.
    pub async fn trigger_on_signal(self) -> Signal {
        let received = next_signal().await;
        tracing::info!(signal = ?received, "Shutdown requested");
        self.trigger();
        received
    }
}

/// Cancellation token checked by the notifier loop.
///
/// If the trigger is dropped without firing, the token never fires.
#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown has been requested.
    pub async fn triggered(&mut self) {
        if self.rx.wait_for(|stop| *stop).await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    /// Drives `fut` to completion unless shutdown is requested first, in which
    /// case `fut` is dropped and `None` is returned.
    pub async fn run_until<F: Future>(&mut self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.triggered() => None,
            out = fut => Some(out),
        }
    }
}
