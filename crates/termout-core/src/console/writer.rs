//! Tee writer: forwards to a destination and counts the bytes on the bar.

use std::io::{self, Write};

use super::Console;

/// Wraps a destination writer so `io::copy(&mut src, &mut ProgressWriter::new(dst, console))`
/// advances the console's bar by exactly the bytes the destination accepted.
#[derive(Debug)]
pub struct ProgressWriter<W> {
    inner: W,
    console: Console,
}

impl<W: Write> ProgressWriter<W> {
    pub fn new(inner: W, console: Console) -> Self {
        Self { inner, console }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for ProgressWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.console.add_bar(n as u64);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
