//! Scope guard that starts a console and always shuts it down.

use std::ops::Deref;

use super::Console;
use crate::config::ConsoleConfig;
use crate::output::Output;

/// Owns the process's console for the duration of a scope. Dropping it
/// (normal return, `?`, or unwinding) runs [`Console::shutdown`], so the bar
/// line is erased and all queued output is written before the caller moves on.
#[derive(Debug)]
pub struct ConsoleSession {
    console: Console,
}

impl ConsoleSession {
    pub fn start(output: Output, cfg: &ConsoleConfig) -> Self {
        let console = Console::new(output, cfg);
        console.start();
        Self { console }
    }

    /// A handle to pass to producers.
    pub fn console(&self) -> &Console {
        &self.console
    }
}

impl Deref for ConsoleSession {
    type Target = Console;

    fn deref(&self) -> &Console {
        &self.console
    }
}

impl Drop for ConsoleSession {
    fn drop(&mut self) {
        self.console.shutdown();
    }
}
