//! Progress bar: shared counters plus a ticker thread that renders frames.
//!
//! The bar never writes anywhere itself. Each frame is handed to a callback
//! (the console turns it into a `ProgressFrame` message), so the coordinator
//! stays the only writer to the terminal.

mod render;
mod stats;

pub use render::{human_bytes, render_frame};
pub use stats::BarStats;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::output::TerminalWidth;

/// What the bar counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Items,
    /// Byte sizes and throughput are shown.
    Bytes,
}

struct BarState {
    current: AtomicU64,
    total: u64,
    units: Units,
    width: usize,
    columns: TerminalWidth,
    started: Instant,
}

impl fmt::Debug for BarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarState")
            .field("current", &self.current)
            .field("total", &self.total)
            .field("units", &self.units)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

impl BarState {
    fn stats(&self) -> BarStats {
        BarStats {
            current: self.current.load(Ordering::Relaxed),
            total: self.total,
            elapsed_secs: self.started.elapsed().as_secs_f64(),
        }
    }

    fn frame(&self) -> String {
        render_frame(&self.stats(), self.units, self.width, (self.columns)())
    }
}

/// A running progress bar. Producers call [`Bar::add`]; the ticker redraws
/// every `refresh` until [`Bar::finish`] (or drop).
#[derive(Debug)]
pub struct Bar {
    state: Arc<BarState>,
    stop_tx: mpsc::Sender<()>,
    ticker: Option<JoinHandle<()>>,
}

impl Bar {
    /// Start a bar. The first frame is delivered before this returns; after
    /// that `on_frame` runs on the ticker thread. `columns` is asked on every
    /// redraw so frames follow terminal resizes.
    pub fn start<F>(
        total: u64,
        units: Units,
        width: usize,
        columns: TerminalWidth,
        refresh: Duration,
        on_frame: F,
    ) -> Self
    where
        F: Fn(String) + Send + 'static,
    {
        let state = Arc::new(BarState {
            current: AtomicU64::new(0),
            total,
            units,
            width: width.max(1),
            columns,
            started: Instant::now(),
        });
        on_frame(state.frame());

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let ticker_state = Arc::clone(&state);
        let ticker = thread::spawn(move || {
            loop {
                match stop_rx.recv_timeout(refresh) {
                    Err(RecvTimeoutError::Timeout) => on_frame(ticker_state.frame()),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            // Final redraw so the last state reported is the real one.
            on_frame(ticker_state.frame());
        });
        tracing::debug!(total, ?units, "progress bar started");

        Self {
            state,
            stop_tx,
            ticker: Some(ticker),
        }
    }

    /// Advance by `n` units. Overshooting the total is allowed.
    pub fn add(&self, n: u64) {
        self.state.current.fetch_add(n, Ordering::Relaxed);
    }

    pub fn position(&self) -> u64 {
        self.state.current.load(Ordering::Relaxed)
    }

    pub fn stats(&self) -> BarStats {
        self.state.stats()
    }

    /// Stop the ticker. Returns once the final frame has been delivered.
    pub fn finish(mut self) {
        self.stop_ticker();
    }

    fn stop_ticker(&mut self) {
        let Some(ticker) = self.ticker.take() else {
            return;
        };
        let _ = self.stop_tx.send(());
        if ticker.join().is_err() {
            tracing::warn!("progress bar ticker panicked");
        }
        tracing::debug!(position = self.position(), "progress bar finished");
    }
}

impl Drop for Bar {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}
