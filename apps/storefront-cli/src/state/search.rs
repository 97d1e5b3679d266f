//! # Search Debouncer
//!
//! Coalesces rapid search input into one update after a quiet period.
//!
//! ## Timing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  input:   "l"   "la"   "lap"                           "lapt"           │
//! │  time:     0     80     140 ─────── 300 ms ──────► 440   900 ── 300 ──► │
//! │                                                  │                  │   │
//! │  output:                                       "lap"             "lapt" │
//! │                                                                         │
//! │  Every input restarts the timer. Only the latest text is emitted.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dropping the [`DebounceHandle`] flushes any pending text immediately and
//! stops the task.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

use crate::error::{CliError, CliResult};

/// Sends raw search input to a running debouncer.
#[derive(Debug, Clone)]
pub struct DebounceHandle {
    input_tx: mpsc::Sender<String>,
}

impl DebounceHandle {
    /// Submits the current search text.
    pub async fn push(&self, text: impl Into<String>) -> CliResult<()> {
        self.input_tx
            .send(text.into())
            .await
            .map_err(|_| CliError::internal("Search debouncer stopped"))
    }
}

/// Debounce policy for search input.
#[derive(Debug, Clone, Copy)]
pub struct SearchDebouncer {
    delay: Duration,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        SearchDebouncer { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Spawns the debounce task.
    ///
    /// Returns the input handle and the receiver of settled search text.
    pub fn start(self) -> (DebounceHandle, mpsc::Receiver<String>) {
        let (input_tx, input_rx) = mpsc::channel(64);
        let (output_tx, output_rx) = mpsc::channel(16);

        tokio::spawn(async move {
            self.run(input_rx, output_tx).await;
        });

        (DebounceHandle { input_tx }, output_rx)
    }

    /// Main debounce loop.
    async fn run(self, mut input_rx: mpsc::Receiver<String>, output_tx: mpsc::Sender<String>) {
        debug!(delay_ms = self.delay.as_millis() as u64, "Search debouncer started");

        let mut pending: Option<String> = None;
        let timer = sleep(self.delay);
        tokio::pin!(timer);

        loop {
            tokio::select! {
                input = input_rx.recv() => {
                    match input {
                        Some(text) => {
                            trace!(text = %text, "Search input");
                            pending = Some(text);
                            timer.as_mut().reset(Instant::now() + self.delay);
                        }
                        None => {
                            if let Some(text) = pending.take() {
                                let _ = output_tx.send(text).await;
                            }
                            debug!("Search debouncer stopped");
                            break;
                        }
                    }
                }
                () = &mut timer, if pending.is_some() => {
                    if let Some(text) = pending.take() {
                        debug!(text = %text, "Search settled");
                        if output_tx.send(text).await.is_err() {
                            break;
                        }
                    }
                }
            }
        }
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        SearchDebouncer::new(Duration::from_millis(crate::config::DEFAULT_DEBOUNCE_MS))
    }
}
