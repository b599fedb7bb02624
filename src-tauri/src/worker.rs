//! Background fill runs for the desktop shell.
//!
//! One task runs the pipeline and pushes operator log lines into a channel;
//! a second task drains the channel on a fixed tick and hands each batch to
//! the window.

use formfill_core::AppSettings;
use formfill_filler::{run_pipeline, RunEvent, RunOptions};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// How often queued log lines are flushed to the window.
pub const DRAIN_INTERVAL: Duration = Duration::from_millis(100);

/// Payload of the `run:log` event.
#[derive(Debug, Clone, Serialize)]
pub struct RunLog {
    pub run_id: String,
    pub lines: Vec<String>,
}

/// Payload of the `run:finished` event.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunFinished {
    pub run_id: String,
    /// Report written by the run, if any
    pub report: Option<String>,
    /// Message of the error that aborted the run
    pub error: Option<String>,
}

/// Outcome returned by the pipeline task.
#[derive(Debug, Clone, Default)]
pub struct WorkerOutcome {
    pub report: Option<String>,
    pub error: Option<String>,
}

/// Spawn the pipeline task. Log lines go to `tx`, which is dropped when the
/// run ends.
pub fn spawn_worker(
    options: RunOptions,
    settings: AppSettings,
    tx: mpsc::UnboundedSender<String>,
) -> JoinHandle<WorkerOutcome> {
    tokio::spawn(async move {
        let _ = tx.send("--- Starting Automation ---".to_string());

        let result = run_pipeline(&options, &settings, |event| {
            let line = match event {
                RunEvent::Aborted { message } => format!("FATAL ERROR: {message}"),
                other => other.to_string(),
            };
            let _ = tx.send(line);
        })
        .await;

        match result {
            Ok(summary) => {
                info!(rows = summary.results.len(), "run complete");
                WorkerOutcome {
                    report: summary.report.map(|p| p.display().to_string()),
                    error: None,
                }
            }
            Err(e) => {
                error!("run aborted: {:#}", e);
                WorkerOutcome {
                    report: None,
                    error: Some(e.to_string()),
                }
            }
        }
    })
}

/// Forward queued lines every `interval` until the sender side closes, then
/// wait for the worker's outcome.
pub async fn drain_logs<F>(
    mut rx: mpsc::UnboundedReceiver<String>,
    worker: JoinHandle<WorkerOutcome>,
    interval: Duration,
    mut on_batch: F,
) -> WorkerOutcome
where
    F: FnMut(Vec<String>) + Send,
{
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;

        let mut batch = Vec::new();
        let closed = loop {
            match rx.try_recv() {
                Ok(line) => batch.push(line),
                Err(TryRecvError::Empty) => break false,
                Err(TryRecvError::Disconnected) => break true,
            }
        };

        if !batch.is_empty() {
            on_batch(batch);
        }
        if closed {
            break;
        }
    }

    worker.await.unwrap_or_else(|e| {
        error!("worker task failed: {}", e);
        WorkerOutcome {
            report: None,
            error: Some(format!("worker task failed: {e}")),
        }
    })
}
