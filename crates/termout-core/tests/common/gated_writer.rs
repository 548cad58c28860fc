//! Writer that stalls until released, to simulate a slow or blocked terminal.

use std::io::{self, Write};
use std::sync::{Arc, Condvar, Mutex};

use termout_core::Captured;

#[derive(Clone, Default)]
pub struct Gate {
    state: Arc<(Mutex<bool>, Condvar)>,
}

impl Gate {
    pub fn open(&self) {
        let (open, cv) = &*self.state;
        *open.lock().unwrap() = true;
        cv.notify_all();
    }

    fn wait(&self) {
        let (open, cv) = &*self.state;
        let mut guard = open.lock().unwrap();
        while !*guard {
            guard = cv.wait(guard).unwrap();
        }
    }
}

/// Blocks every write until the gate opens, then records into `captured`.
pub struct GatedWriter {
    pub gate: Gate,
    pub captured: Captured,
}

impl GatedWriter {
    pub fn new() -> Self {
        Self {
            gate: Gate::default(),
            captured: Captured::new(),
        }
    }
}

impl Write for GatedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.gate.wait();
        self.captured.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
