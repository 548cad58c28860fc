//! Output device handed to the coordinator: stdout, any writer, or an in-memory capture.

use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex};

/// Width assumed when the device cannot report one.
pub const DEFAULT_COLUMNS: usize = 80;

/// Current width of the device in columns, asked before every bar redraw.
pub type TerminalWidth = Arc<dyn Fn() -> usize + Send + Sync>;

/// The device the coordinator owns. `interactive` decides whether the progress
/// bar (and its control sequences) is ever shown; `columns` bounds each frame.
pub struct Output {
    pub(crate) writer: Box<dyn Write + Send>,
    pub(crate) interactive: bool,
    pub(crate) columns: TerminalWidth,
}

impl Output {
    /// Standard output; interactive iff stdout is attached to a terminal.
    /// The width follows terminal resizes.
    pub fn stdout() -> Self {
        let interactive = io::stdout().is_terminal();
        Self {
            writer: Box::new(io::stdout()),
            interactive,
            columns: Arc::new(terminal_columns),
        }
    }

    /// Any writer, with interactivity stated by the caller. Assumes
    /// [`DEFAULT_COLUMNS`] unless overridden with [`Output::with_columns`].
    pub fn from_writer<W: Write + Send + 'static>(writer: W, interactive: bool) -> Self {
        Self {
            writer: Box::new(writer),
            interactive,
            columns: Arc::new(|| DEFAULT_COLUMNS),
        }
    }

    /// Fixed device width.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = Arc::new(move || columns);
        self
    }

    /// Non-interactive in-memory target. The returned [`Captured`] reads back
    /// everything written so far.
    pub fn capture() -> (Self, Captured) {
        let captured = Captured::default();
        (Self::from_writer(captured.clone(), false), captured)
    }

    /// Downgrade to plain-text mode regardless of the device.
    pub fn plain(mut self) -> Self {
        self.interactive = false;
        self
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn columns(&self) -> usize {
        (self.columns)()
    }
}

fn terminal_columns() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(DEFAULT_COLUMNS)
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("interactive", &self.interactive)
            .finish_non_exhaustive()
    }
}

/// Shared byte buffer. Cloning shares the same storage, so one clone can be
/// given to the coordinator as a writer and another kept for reading.
#[derive(Debug, Clone, Default)]
pub struct Captured {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Captured {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    }

    pub fn len(&self) -> usize {
        self.buf.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Write for Captured {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
