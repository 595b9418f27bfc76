//! Batched line output.
//!
//! Expanding a large range means millions of one-line writes; the batcher
//! accumulates formatted addresses in a bounded buffer and hands the sink
//! whole batches instead.

use std::fmt;
use std::fmt::Write as _;
use std::io;
use std::io::Write;

/// Default buffer capacity in bytes.
pub const DEFAULT_CAPACITY: usize = 64 * 1024;

/// Smallest usable capacity: one canonical IPv6 address (45 bytes) plus the
/// line terminator. Guarantees the append after a flush always fits.
pub const MIN_CAPACITY: usize = 46;

/// Accumulates formatted address lines and flushes them to the sink in
/// batches.
pub struct OutputBatcher<W: Write> {
    sink: W,
    buf: Vec<u8>,
    capacity: usize,
    scratch: String,
}

impl<W: Write> OutputBatcher<W> {
    pub fn new(sink: W) -> OutputBatcher<W> {
        OutputBatcher::with_capacity(DEFAULT_CAPACITY, sink)
    }

    /// Create a batcher with a specific buffer capacity.
    ///
    /// Capacities below [`MIN_CAPACITY`] are raised to it.
    pub fn with_capacity(capacity: usize, sink: W) -> OutputBatcher<W> {
        let capacity = capacity.max(MIN_CAPACITY);
        OutputBatcher {
            sink,
            buf: Vec::with_capacity(capacity),
            capacity,
            scratch: String::new(),
        }
    }

    /// Format one address and append it plus a newline to the buffer,
    /// flushing first if the append would exceed capacity.
    pub fn emit(&mut self, addr: &impl fmt::Display) -> io::Result<()> {
        self.scratch.clear();
        write!(self.scratch, "{addr}").expect("formatting to a String cannot fail");

        if self.buf.len() + self.scratch.len() + 1 > self.capacity {
            self.flush()?;
        }
        self.buf.extend_from_slice(self.scratch.as_bytes());
        self.buf.push(b'\n');
        Ok(())
    }

    /// Write any buffered remainder to the sink.
    pub fn flush(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            self.sink.write_all(&self.buf)?;
            self.buf.clear();
        }
        Ok(())
    }

    /// Consume the batcher, flushing the remainder and returning the sink.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.flush()?;
        Ok(self.sink)
    }
}
