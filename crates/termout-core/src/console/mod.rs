//! Serialized console output with an optional overwrite-in-place progress bar.
//!
//! Producers on any thread hold a cloned [`Console`] and enqueue messages;
//! a single coordinator thread owns the output device and writes them in
//! FIFO order. Lifecycle: `start` once, `shutdown` once. [`ConsoleSession`]
//! ties both to a scope.

mod coordinator;
mod message;
mod session;
mod writer;

pub use coordinator::ERASE_LINE;
pub use message::Message;
pub use session::ConsoleSession;
pub use writer::ProgressWriter;

use std::fmt;
use std::io;
use std::mem;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::bar::{Bar, Units};
use crate::config::ConsoleConfig;
use crate::error::ContractViolation;
use crate::output::{Output, TerminalWidth};

use coordinator::Coordinator;
use message::Envelope;

enum Lifecycle {
    /// Constructed, coordinator not yet running. Messages queue up in `rx`.
    Idle {
        rx: Receiver<Envelope>,
        coordinator: Coordinator,
    },
    Running(JoinHandle<()>),
    Stopped,
}

struct Shared {
    tx: SyncSender<Envelope>,
    interactive: bool,
    bar_width: usize,
    columns: TerminalWidth,
    refresh: Duration,
    bar: Mutex<Option<Bar>>,
    lifecycle: Mutex<Lifecycle>,
}

/// Producer-facing handle. Cheap to clone; every clone feeds the same coordinator.
#[derive(Clone)]
pub struct Console {
    shared: Arc<Shared>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

impl Console {
    /// Build a console over `output`. Nothing is written until [`Console::start`].
    ///
    /// Before `start`, at most `queue_capacity` messages can be queued; a
    /// producer enqueuing more blocks until `start` (or `shutdown`) runs on
    /// another thread.
    pub fn new(output: Output, cfg: &ConsoleConfig) -> Self {
        let (tx, rx) = mpsc::sync_channel(cfg.queue_capacity());
        let interactive = output.interactive && !cfg.plain;
        if !interactive {
            tracing::debug!("console output is not interactive; progress bar disabled");
        }
        Self {
            shared: Arc::new(Shared {
                tx,
                interactive,
                bar_width: cfg.bar_width(),
                columns: output.columns,
                refresh: cfg.refresh_interval(),
                bar: Mutex::new(None),
                lifecycle: Mutex::new(Lifecycle::Idle {
                    rx,
                    coordinator: Coordinator::new(output.writer),
                }),
            }),
        }
    }

    /// Spawn the coordinator. Panics if the console was already started.
    pub fn start(&self) {
        if let Err(e) = self.try_start() {
            panic!("{}", e);
        }
    }

    pub fn try_start(&self) -> Result<(), ContractViolation> {
        let mut lifecycle = lock(&self.shared.lifecycle);
        match mem::replace(&mut *lifecycle, Lifecycle::Stopped) {
            Lifecycle::Idle { rx, coordinator } => {
                let handle = thread::spawn(move || coordinator.run(rx));
                *lifecycle = Lifecycle::Running(handle);
                tracing::debug!("console coordinator started");
                Ok(())
            }
            other => {
                *lifecycle = other;
                Err(ContractViolation::AlreadyStarted)
            }
        }
    }

    /// Whether the bar can ever be shown on this console.
    pub fn is_interactive(&self) -> bool {
        self.shared.interactive
    }

    /// Enqueue plain text. Blocks only while the queue is full, which before
    /// `start` means once `queue_capacity` messages are waiting.
    pub fn print(&self, text: impl Into<String>) {
        self.enqueue(Message::Print(text.into()));
    }

    /// Format and enqueue, e.g. `console.printf(format_args!("copied {}\n", name))`.
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.enqueue(Message::Print(fmt::format(args)));
    }

    /// Show a progress bar counting up to `total` (bytes with throughput if
    /// `is_bytes`). A no-op on non-interactive output.
    ///
    /// # Panics
    ///
    /// Panics the calling thread if a bar is already active. That ends the
    /// process only on the main thread or under `panic = "abort"`; use
    /// [`Console::try_init_bar`] to handle it instead.
    pub fn init_bar(&self, total: u64, is_bytes: bool) {
        if let Err(e) = self.try_init_bar(total, is_bytes) {
            panic!("{}", e);
        }
    }

    pub fn try_init_bar(&self, total: u64, is_bytes: bool) -> Result<(), ContractViolation> {
        if !self.shared.interactive {
            return Ok(());
        }
        let mut slot = lock(&self.shared.bar);
        if slot.is_some() {
            return Err(ContractViolation::BarAlreadyActive);
        }
        let units = if is_bytes { Units::Bytes } else { Units::Items };
        let tx = self.shared.tx.clone();
        let bar = Bar::start(
            total,
            units,
            self.shared.bar_width,
            Arc::clone(&self.shared.columns),
            self.shared.refresh,
            move |frame| {
                let _ = tx.send(Envelope::Message(Message::ProgressFrame(frame)));
            },
        );
        *slot = Some(bar);
        Ok(())
    }

    /// Advance the active bar; a no-op when there is none.
    pub fn add_bar(&self, count: u64) {
        if let Some(bar) = lock(&self.shared.bar).as_ref() {
            bar.add(count);
        }
    }

    /// Stop and erase the active bar; a no-op when there is none.
    pub fn shutdown_bar(&self) {
        let bar = lock(&self.shared.bar).take();
        let Some(bar) = bar else {
            return;
        };
        bar.finish();
        self.enqueue(Message::HideProgress);
    }

    /// Retire the bar, stop the coordinator, and block until everything
    /// enqueued so far has been written. Later calls are no-ops.
    ///
    /// Called before `start`, the queued messages are written on this thread.
    /// Producers blocked on a full pre-start queue are released as it drains.
    pub fn shutdown(&self) {
        self.shutdown_bar();
        let mut lifecycle = lock(&self.shared.lifecycle);
        match mem::replace(&mut *lifecycle, Lifecycle::Stopped) {
            Lifecycle::Running(handle) => {
                let _ = self.shared.tx.send(Envelope::Stop);
                if handle.join().is_err() {
                    tracing::warn!("console coordinator panicked");
                }
            }
            Lifecycle::Idle { rx, coordinator } => {
                // Never started: flush what was queued on this thread.
                tracing::debug!("console shut down before start; draining inline");
                coordinator.drain(rx);
            }
            Lifecycle::Stopped => {}
        }
    }

    fn enqueue(&self, msg: Message) {
        if self.shared.tx.send(Envelope::Message(msg)).is_err() {
            tracing::warn!("console already shut down; message dropped");
        }
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("interactive", &self.shared.interactive)
            .finish_non_exhaustive()
    }
}

/// Byte sink: every write advances the active bar by its length and reports
/// full success, so copy loops can drive the bar without knowing about it.
impl io::Write for Console {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.add_bar(buf.len() as u64);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Write for &Console {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.add_bar(buf.len() as u64);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
