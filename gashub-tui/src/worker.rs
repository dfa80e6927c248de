//! Background worker thread for exchange-rate fetches.
//!
//! The main thread owns every piece of presentation state; the worker only
//! talks to the rate service and reports back over `mpsc` channels. Requests
//! are served in order and never retried.

use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use gashub_core::currency::fetch_rate;
use gashub_core::RateSource;

/// Commands sent from the TUI to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerCommand {
    FetchRate { target: String },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResponse {
    RateFetched { target: String, rate: f64 },
    RateFailed { target: String, error: String },
}

/// Spawn the worker. It runs until it receives `Shutdown` or the command
/// channel closes.
pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    source: Box<dyn RateSource>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("gashub-rates".into())
        .spawn(move || worker_loop(rx, tx, source))
}

fn worker_loop(rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>, source: Box<dyn RateSource>) {
    tracing::debug!(source = source.name(), "rate worker started");
    while let Ok(cmd) = rx.recv() {
        match cmd {
            WorkerCommand::FetchRate { target } => {
                let resp = match fetch_rate(source.as_ref(), &target) {
                    Ok(rate) => WorkerResponse::RateFetched { target, rate },
                    Err(e) => WorkerResponse::RateFailed {
                        target,
                        error: e.to_string(),
                    },
                };
                if tx.send(resp).is_err() {
                    break;
                }
            }
            WorkerCommand::Shutdown => break,
        }
    }
    tracing::debug!("rate worker stopped");
}
