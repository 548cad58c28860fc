//! The single writer: drains the queue and owns the bar-visibility flag.

use std::io::Write;
use std::sync::mpsc::Receiver;

use super::message::{Envelope, Message};

/// Carriage return, then clear the whole line.
pub const ERASE_LINE: &str = "\r\x1b[2K";

pub(super) struct Coordinator {
    out: Box<dyn Write + Send>,
    bar_visible: bool,
    handled: u64,
    write_failures: u64,
}

impl Coordinator {
    pub(super) fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out,
            bar_visible: false,
            handled: 0,
            write_failures: 0,
        }
    }

    /// Process messages until `Stop`, then drain whatever is still queued.
    /// Returns when the queue is empty; the caller joins on that.
    pub(super) fn run(mut self, rx: Receiver<Envelope>) {
        while let Ok(envelope) = rx.recv() {
            match envelope {
                Envelope::Message(msg) => self.handle(msg),
                Envelope::Stop => break,
            }
        }
        self.drain(rx);
    }

    /// Write out everything currently queued without waiting for more.
    pub(super) fn drain(mut self, rx: Receiver<Envelope>) {
        while let Ok(envelope) = rx.try_recv() {
            if let Envelope::Message(msg) = envelope {
                self.handle(msg);
            }
        }
        tracing::debug!(
            handled = self.handled,
            write_failures = self.write_failures,
            "console coordinator stopped"
        );
    }

    pub(super) fn handle(&mut self, msg: Message) {
        self.handled += 1;
        match msg {
            Message::Print(text) => {
                if self.bar_visible {
                    self.emit(ERASE_LINE);
                    self.bar_visible = false;
                }
                self.emit(&text);
            }
            Message::ProgressFrame(frame) => {
                self.emit("\r");
                self.emit(&frame);
                self.bar_visible = true;
            }
            Message::HideProgress => {
                if self.bar_visible {
                    self.emit(ERASE_LINE);
                    self.bar_visible = false;
                }
            }
        }
        if let Err(e) = self.out.flush() {
            self.write_failed(&e);
        }
    }

    fn emit(&mut self, s: &str) {
        if let Err(e) = self.out.write_all(s.as_bytes()) {
            self.write_failed(&e);
        }
    }

    fn write_failed(&mut self, e: &std::io::Error) {
        self.write_failures += 1;
        tracing::warn!(error = %e, "console write failed");
    }

    #[cfg(test)]
    pub(super) fn bar_visible(&self) -> bool {
        self.bar_visible
    }
}
