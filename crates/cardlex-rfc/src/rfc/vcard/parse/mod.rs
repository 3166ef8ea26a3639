//! vCard tokenizing (RFC 6350).
//!
//! ## Features
//!
//! - Pull-based: one token per call, resumable at any point
//! - Handles line folding with a one-byte lookahead
//! - Accepts both CRLF and bare LF line endings
//! - Tracks the `ENCODING` parameter of the current property

mod error;
mod lookahead;
mod token;
mod tokenizer;

pub use error::{TokenizeError, TokenizeResult};
pub use token::{NameToken, ParamToken, Token, TokenKind, ValueToken};
pub use tokenizer::{Encoding, Tokenizer};
