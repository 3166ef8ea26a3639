//! One-byte pushback over a buffered source.

use std::io::{self, BufRead, ErrorKind};

/// Wraps a [`BufRead`] with an owned single-byte pushback slot.
///
/// Reads always drain the pushed-back byte before touching the source, so
/// the behavior does not depend on how the source buffers its data.
#[derive(Debug)]
pub(crate) struct Lookahead<R> {
    inner: R,
    pushed_back: Option<u8>,
}

impl<R: BufRead> Lookahead<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            pushed_back: None,
        }
    }

    /// Appends bytes to `buf` up to and including `delim`, or until end of stream.
    ///
    /// Returns the number of bytes appended; zero means the stream is exhausted.
    pub(crate) fn read_until(&mut self, delim: u8, buf: &mut Vec<u8>) -> io::Result<usize> {
        let mut read = 0;
        if let Some(byte) = self.pushed_back.take() {
            buf.push(byte);
            if byte == delim {
                return Ok(1);
            }
            read = 1;
        }
        Ok(read + self.inner.read_until(delim, buf)?)
    }

    /// Reads a single byte, or `None` at end of stream.
    pub(crate) fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pushed_back.take() {
            return Ok(Some(byte));
        }
        loop {
            let byte = match self.inner.fill_buf() {
                Ok(available) => available.first().copied(),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if byte.is_some() {
                self.inner.consume(1);
            }
            return Ok(byte);
        }
    }

    /// Pushes `byte` back so the next read returns it first.
    pub(crate) fn unread_byte(&mut self, byte: u8) {
        debug_assert!(self.pushed_back.is_none(), "only one byte of pushback");
        self.pushed_back = Some(byte);
    }
}
