//! Streaming vCard tokenizer.
//!
//! The tokenizer is a three-state machine driven one token at a time:
//!
//! ```text
//! Name ──(no params)──────────────► Value ──(line not folded)──► Name
//!   └──(params)──► Param ─(last)──►   ▲ └──(folded)──┘
//!                   └─(more)─┘
//! ```
//!
//! Only the name and value states read from the source. Parameters are split
//! from the bytes already read for the name.

use std::io::{BufRead, BufReader, Read};
use std::iter::FusedIterator;

use cardlex_core::config::{EncodingErrorOrdering, FoldWhitespace, TokenizerConfig};
use cardlex_core::error::CoreError;

use super::error::{TokenizeError, TokenizeResult};
use super::lookahead::Lookahead;
use super::token::{NameToken, ParamToken, Token, ValueToken};

/// Content encoding announced by the `ENCODING` parameter of a property.
///
/// Values are always returned as raw bytes; the selector tells the consumer
/// how to decode them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// `7BIT`, `8BIT`, or no `ENCODING` parameter.
    #[default]
    Raw,
    QuotedPrintable,
    /// `B` or `BASE64`.
    Base64,
}

impl Encoding {
    /// Maps an `ENCODING` parameter value to an encoding (case-insensitive).
    #[must_use]
    pub fn from_param_value(value: &[u8]) -> Option<Self> {
        const TABLE: [(&[u8], Encoding); 5] = [
            (b"7BIT", Encoding::Raw),
            (b"8BIT", Encoding::Raw),
            (b"QUOTED-PRINTABLE", Encoding::QuotedPrintable),
            (b"B", Encoding::Base64),
            (b"BASE64", Encoding::Base64),
        ];

        TABLE
            .iter()
            .find(|(name, _)| value.eq_ignore_ascii_case(name))
            .map(|&(_, encoding)| encoding)
    }
}

#[derive(Debug)]
enum Mode {
    Name,
    /// Unparsed parameter text of the current line, after the name's `;`.
    Param(Vec<u8>),
    Value,
    /// Held while a step runs; left in place when the step fails.
    Poisoned,
}

/// Pull-based tokenizer over a buffered vCard byte stream.
///
/// Each call to [`Tokenizer::next_token`] yields one [`Token`]. The sequence
/// for a property is one name token, zero or more parameter tokens and one or
/// more value tokens (more than one when the value is folded).
///
/// ## Example
///
/// ```rust
/// use cardlex_rfc::rfc::vcard::{Token, Tokenizer};
///
/// let mut tokenizer = Tokenizer::new(&b"BEGIN:VCARD\r\n"[..]);
///
/// assert_eq!(tokenizer.next_token().unwrap(), Some(Token::name("BEGIN")));
/// assert_eq!(
///     tokenizer.next_token().unwrap(),
///     Some(Token::value("VCARD\r\n", false))
/// );
/// assert_eq!(tokenizer.next_token().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct Tokenizer<R> {
    source: Lookahead<R>,
    config: TokenizerConfig,
    mode: Mode,
    encoding: Encoding,
    deferred: Option<TokenizeError>,
    /// Set once the iterator has reported end of stream.
    exhausted: bool,
}

impl<R: Read> Tokenizer<BufReader<R>> {
    /// Creates a tokenizer over an unbuffered reader.
    #[must_use]
    pub fn from_reader(reader: R) -> Self {
        Self::new(BufReader::new(reader))
    }
}

impl<R: BufRead> Tokenizer<R> {
    /// Creates a tokenizer with the default configuration.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, TokenizerConfig::default())
    }

    #[must_use]
    pub fn with_config(reader: R, config: TokenizerConfig) -> Self {
        Self {
            source: Lookahead::new(reader),
            config,
            mode: Mode::Name,
            encoding: Encoding::Raw,
            deferred: None,
            exhausted: false,
        }
    }

    /// Encoding of the property currently being tokenized.
    ///
    /// Reset to [`Encoding::Raw`] by every name token and updated by
    /// `ENCODING` parameters, so it applies to the value tokens that follow.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Reads the next token.
    ///
    /// Returns `Ok(None)` once the stream is exhausted. Unlike the iterator,
    /// a later call reads the source again and picks up any data it delivers.
    ///
    /// ## Errors
    /// - [`TokenizeError::IncompleteName`] if the stream ends before a name's `:`.
    /// - [`TokenizeError::UnknownEncoding`] for an unrecognized `ENCODING` value.
    /// - [`TokenizeError::Io`] if the underlying reader fails.
    /// - [`TokenizeError::Core`] if called again after any of the above.
    pub fn next_token(&mut self) -> TokenizeResult<Option<Token>> {
        if let Some(err) = self.deferred.take() {
            self.mode = Mode::Poisoned;
            return Err(err);
        }

        match std::mem::replace(&mut self.mode, Mode::Poisoned) {
            Mode::Name => self.read_name(),
            Mode::Param(pending) => self.read_param(pending).map(Some),
            Mode::Value => self.read_value(),
            Mode::Poisoned => Err(CoreError::InvariantViolation(
                "vCard tokenizer read after a previous read failed",
            )
            .into()),
        }
    }

    fn is_poisoned(&self) -> bool {
        matches!(self.mode, Mode::Poisoned) && self.deferred.is_none()
    }

    fn read_name(&mut self) -> TokenizeResult<Option<Token>> {
        let mut name = Vec::new();
        self.source.read_until(b':', &mut name)?;

        match name.pop() {
            None => {
                self.mode = Mode::Name;
                return Ok(None);
            }
            Some(b':') => {}
            Some(_) => return Err(TokenizeError::IncompleteName),
        }

        self.encoding = Encoding::Raw;
        self.mode = match name.iter().position(|&b| b == b';') {
            Some(x) => {
                let params = name.split_off(x + 1);
                name.truncate(x);
                Mode::Param(params)
            }
            None => Mode::Value,
        };

        tracing::trace!(
            name = %String::from_utf8_lossy(&name),
            has_params = matches!(self.mode, Mode::Param(_)),
            "vCard name token"
        );
        Ok(Some(Token::Name(NameToken { name })))
    }

    fn read_param(&mut self, mut segment: Vec<u8>) -> TokenizeResult<Token> {
        self.mode = match segment.iter().position(|&b| b == b';') {
            Some(x) => {
                let rest = segment.split_off(x + 1);
                segment.truncate(x);
                Mode::Param(rest)
            }
            None => Mode::Value,
        };

        let param = match segment.iter().position(|&b| b == b'=') {
            Some(y) => {
                let value = segment.split_off(y + 1);
                segment.truncate(y);
                ParamToken {
                    name: segment,
                    value: Some(value),
                }
            }
            None => ParamToken {
                name: segment,
                value: None,
            },
        };

        if let Some(value) = &param.value
            && param.name.eq_ignore_ascii_case(b"ENCODING")
        {
            self.apply_encoding(value)?;
        }

        tracing::trace!(
            name = %String::from_utf8_lossy(&param.name),
            value = ?param.value.as_deref().map(String::from_utf8_lossy),
            "vCard param token"
        );
        Ok(Token::Param(param))
    }

    fn apply_encoding(&mut self, value: &[u8]) -> TokenizeResult<()> {
        if let Some(encoding) = Encoding::from_param_value(value) {
            tracing::debug!(?encoding, "vCard value encoding selected");
            self.encoding = encoding;
            return Ok(());
        }

        let err = TokenizeError::UnknownEncoding(String::from_utf8_lossy(value).into_owned());
        tracing::debug!(error = %err, "Rejecting vCard ENCODING parameter");
        match self.config.encoding_error {
            EncodingErrorOrdering::Immediate => {
                self.mode = Mode::Poisoned;
                Err(err)
            }
            EncodingErrorOrdering::AfterParam => {
                self.deferred = Some(err);
                Ok(())
            }
        }
    }

    fn read_value(&mut self) -> TokenizeResult<Option<Token>> {
        match self.encoding {
            Encoding::Raw => self.read_value_raw(),
            Encoding::QuotedPrintable => self.read_value_quoted_printable(),
            Encoding::Base64 => self.read_value_base64(),
        }
    }

    // Decoding belongs to the consumer; these reads stay line-based so the
    // token boundaries are identical for every encoding.
    fn read_value_quoted_printable(&mut self) -> TokenizeResult<Option<Token>> {
        self.read_value_raw()
    }

    fn read_value_base64(&mut self) -> TokenizeResult<Option<Token>> {
        self.read_value_raw()
    }

    fn read_value_raw(&mut self) -> TokenizeResult<Option<Token>> {
        let mut line = Vec::new();
        if self.source.read_until(b'\n', &mut line)? == 0 {
            self.mode = Mode::Name;
            return Ok(None);
        }

        let continues = if line.ends_with(b"\n") {
            self.check_folded()?
        } else {
            false
        };
        self.mode = if continues { Mode::Value } else { Mode::Name };

        tracing::trace!(len = line.len(), continues, "vCard value token");
        Ok(Some(Token::Value(ValueToken {
            value: line,
            continues,
        })))
    }

    /// Peeks at the first byte of the next physical line.
    fn check_folded(&mut self) -> TokenizeResult<bool> {
        match self.source.read_byte()? {
            None => Ok(false),
            Some(b @ (b' ' | b'\t')) => {
                if self.config.fold_whitespace == FoldWhitespace::Preserve {
                    self.source.unread_byte(b);
                }
                Ok(true)
            }
            Some(b) => {
                self.source.unread_byte(b);
                Ok(false)
            }
        }
    }
}

impl<R: BufRead> Iterator for Tokenizer<R> {
    type Item = TokenizeResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted || self.is_poisoned() {
            return None;
        }
        let item = self.next_token().transpose();
        self.exhausted = item.is_none();
        item
    }
}

impl<R: BufRead> FusedIterator for Tokenizer<R> {}
