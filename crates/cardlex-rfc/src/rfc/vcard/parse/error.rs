//! vCard tokenizer error types.

use cardlex_core::error::CoreError;
use thiserror::Error;

/// Result type for vCard tokenizing operations.
pub type TokenizeResult<T> = Result<T, TokenizeError>;

/// An error raised while tokenizing a vCard stream.
///
/// All variants are terminal: once one is returned the tokenizer yields no
/// further tokens.
#[derive(Error, Debug)]
pub enum TokenizeError {
    /// The stream ended inside a property name, before its `:` separator.
    #[error("incomplete name, missing a colon")]
    IncompleteName,

    /// An `ENCODING` parameter carried a value other than
    /// `7BIT`, `8BIT`, `QUOTED-PRINTABLE`, `B` or `BASE64`.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}
