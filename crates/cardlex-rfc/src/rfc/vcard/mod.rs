//! vCard implementation (RFC 6350).
//!
//! This module provides a streaming tokenizer for vCard data. It splits a
//! byte stream into property names, parameters and physical value lines
//! without buffering the whole document.
//!
//! ## Usage
//!
//! ```rust
//! use cardlex_rfc::rfc::vcard::{Token, Tokenizer};
//!
//! let input: &[u8] = b"FN;CHARSET=UTF-8:John Doe\r\n";
//! let tokens = Tokenizer::new(input)
//!     .collect::<Result<Vec<Token>, _>>()
//!     .unwrap();
//!
//! assert_eq!(tokens.len(), 3);
//! ```
//!
//! ## Folding
//!
//! Folded values are reported one physical line at a time. A value token
//! with `continues == true` is followed by another value token for the same
//! property. Joining them is left to the caller, as is decoding of
//! `QUOTED-PRINTABLE` and `BASE64` payloads (see [`Tokenizer::encoding`]).
//!
//! ## Submodules
//!
//! - [`parse`] - Tokenizer, token types and error types

pub mod parse;


// Re-export commonly used types
pub use parse::{
    Encoding, NameToken, ParamToken, Token, TokenKind, TokenizeError, TokenizeResult, Tokenizer,
    ValueToken,
};
