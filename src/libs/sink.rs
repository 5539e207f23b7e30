use crate::libs::alphabet::to_ascii;
use crate::libs::error::MawError;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// The text sink shared by every worker of a run.
///
/// Writes are serialized by the mutex and hold it for exactly one
/// `write_all`. Closing takes the writer out, so later writes fail with
/// [`MawError::SinkClosed`] instead of touching a dropped handle.
#[derive(Clone)]
pub struct SharedSink {
    inner: Arc<Mutex<Option<Box<dyn Write + Send>>>>,
}

impl SharedSink {
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(writer))),
        }
    }

    /// Opens `path` in append mode, creating it if needed.
    pub fn append<P: AsRef<Path>>(path: P) -> Result<Self, MawError> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self::new(Box::new(file)))
    }

    pub fn write_all(&self, bytes: &[u8]) -> Result<(), MawError> {
        let mut guard = self.inner.lock().map_err(|_| MawError::SinkPoisoned)?;
        match guard.as_mut() {
            Some(writer) => Ok(writer.write_all(bytes)?),
            None => Err(MawError::SinkClosed),
        }
    }

    /// Flushes and drops the writer. Closing twice is a no-op.
    pub fn close(&self) -> Result<(), MawError> {
        let mut guard = self.inner.lock().map_err(|_| MawError::SinkPoisoned)?;
        if let Some(mut writer) = guard.take() {
            writer.flush()?;
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().map(|g| g.is_none()).unwrap_or(true)
    }
}

impl std::fmt::Debug for SharedSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSink")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Per-worker batch of discovered words, one per line.
///
/// A word never straddles two flushes: if it does not fit in the remaining
/// room, the pending bytes go to the sink first. The limit only grows, for
/// words longer than the whole buffer.
#[derive(Debug)]
pub struct WordBuffer {
    bytes: Vec<u8>,
    limit: usize,
}

impl Default for WordBuffer {
    fn default() -> Self {
        Self::with_limit(Self::INITIAL_CAPACITY)
    }
}

impl WordBuffer {
    pub const INITIAL_CAPACITY: usize = 1 << 16;

    pub fn with_limit(limit: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(limit),
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Appends `left · path · right` and a newline, all rendered as ASCII.
    pub fn push_word(
        &mut self,
        sink: &SharedSink,
        left: u8,
        path: &[u8],
        right: u8,
    ) -> Result<(), MawError> {
        let needed = path.len() + 3;
        if self.bytes.len() + needed > self.limit {
            self.flush(sink)?;
            while needed > self.limit {
                self.limit *= 2;
            }
            self.bytes.reserve(self.limit);
        }

        self.bytes.push(to_ascii(left));
        self.bytes.extend(path.iter().map(|&c| to_ascii(c)));
        self.bytes.push(to_ascii(right));
        self.bytes.push(b'\n');
        Ok(())
    }

    /// Hands the pending bytes to the sink and rewinds the cursor.
    pub fn flush(&mut self, sink: &SharedSink) -> Result<(), MawError> {
        if self.bytes.is_empty() {
            return Ok(());
        }
        sink.write_all(&self.bytes)?;
        self.bytes.clear();
        Ok(())
    }
}
