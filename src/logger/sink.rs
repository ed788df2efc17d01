//! Output destinations.
//!
//! A `Sink` is a shared reference to a writer. The logging subsystem never
//! owns it exclusively and never closes it; an empty sink discards output.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// A writer shared between the caller and the dispatcher.
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// Destination of a logger's lines.
#[derive(Clone, Default)]
pub struct Sink {
    writer: Option<SharedWriter>,
}

impl Sink {
    /// Wrap an owned writer.
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            writer: Some(Arc::new(Mutex::new(writer))),
        }
    }

    /// Use a writer the caller keeps a handle to.
    pub fn shared(writer: SharedWriter) -> Self {
        Self {
            writer: Some(writer),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// A sink that silently drops every write.
    pub fn discard() -> Self {
        Self { writer: None }
    }

    pub fn is_discard(&self) -> bool {
        self.writer.is_none()
    }

    /// Write one full line. Discarding sinks succeed without doing anything.
    pub(crate) fn write_line(&self, line: &str) -> io::Result<()> {
        let Some(writer) = &self.writer else {
            return Ok(());
        };

        let mut writer = writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.writer {
            Some(_) => f.write_str("Sink(writer)"),
            None => f.write_str("Sink(discard)"),
        }
    }
}

/// A cloneable in-memory writer; clones share the same buffer.
#[derive(Clone, Default)]
pub struct MemoryWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink writing into this buffer.
    pub fn sink(&self) -> Sink {
        Sink::new(self.clone())
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    /// Lines written so far, without terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(|l| l.to_string()).collect()
    }

    pub fn clear(&self) {
        self.buf.lock().clear();
    }
}

impl Write for MemoryWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
