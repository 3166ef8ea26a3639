//! Readers and helpers for exercising the vCard tokenizer.

use std::io::{self, BufReader, ErrorKind, Read};

use cardlex_core::config::TokenizerConfig;
use cardlex_rfc::rfc::vcard::{Token, TokenizeResult, Tokenizer};

/// A reader that reports a fixed I/O error where the inner reader would
/// signal a clean end of stream.
#[derive(Debug)]
pub struct EofErrorReader<R> {
    inner: R,
    kind: ErrorKind,
    message: &'static str,
}

impl<R: Read> EofErrorReader<R> {
    #[must_use]
    pub fn new(inner: R, kind: ErrorKind, message: &'static str) -> Self {
        Self {
            inner,
            kind,
            message,
        }
    }
}

impl<R: Read> Read for EofErrorReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf)? {
            0 if !buf.is_empty() => Err(io::Error::new(self.kind, self.message)),
            n => Ok(n),
        }
    }
}

/// A reader that returns at most `chunk` bytes per call.
#[derive(Debug)]
pub struct ChunkedReader<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl<'a> ChunkedReader<'a> {
    /// ## Summary
    /// Creates a reader over `data`. A `chunk` of zero is treated as one.
    #[must_use]
    pub fn new(data: &'a [u8], chunk: usize) -> Self {
        Self {
            data,
            chunk: chunk.max(1),
        }
    }
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len());
        let (head, tail) = self.data.split_at(n);
        buf[..n].copy_from_slice(head);
        self.data = tail;
        Ok(n)
    }
}

/// ## Summary
/// Tokenizes `input` to completion, feeding the tokenizer `chunk` bytes at a time.
///
/// ## Errors
/// Returns the first error reported by the tokenizer.
pub fn collect_tokens(
    input: &[u8],
    chunk: usize,
    config: TokenizerConfig,
) -> TokenizeResult<Vec<Token>> {
    let reader = BufReader::with_capacity(chunk.max(1), ChunkedReader::new(input, chunk));
    let tokens = Tokenizer::with_config(reader, config).collect::<TokenizeResult<Vec<_>>>()?;
    tracing::trace!(count = tokens.len(), chunk, "Collected vCard tokens");
    Ok(tokens)
}
