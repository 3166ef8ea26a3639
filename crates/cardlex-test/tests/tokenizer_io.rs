//! Tokenizer behavior against readers with unusual buffering or failures.

use std::io::{BufReader, ErrorKind};

use cardlex_core::config::{Settings, TokenizerConfig};
use cardlex_rfc::rfc::vcard::{Encoding, Token, TokenKind, TokenizeError, Tokenizer};
use cardlex_test::{ChunkedReader, EofErrorReader, collect_tokens};

const CARD: &[u8] = b"BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
N;CHARSET=UTF-8:Doe;John;;;\r\n\
FN:John\r\n  Doe\r\n\
NOTE;ENCODING=QUOTED-PRINTABLE:line one=0D=0A=\r\n\tline two\r\n\
PHOTO;ENCODING=b;TYPE=JPEG:AAAA\r\n BBBB\r\n\
END:VCARD\r\n";

#[test_log::test]
fn io_error_is_propagated_verbatim() {
    let reader = EofErrorReader::new(&b"DUMMY:"[..], ErrorKind::Other, "this is dummy error");
    let mut tokenizer = Tokenizer::from_reader(reader);

    assert_eq!(tokenizer.next_token().unwrap(), Some(Token::name("DUMMY")));

    match tokenizer.next_token() {
        Err(TokenizeError::Io(err)) => {
            assert_eq!(err.kind(), ErrorKind::Other);
            assert_eq!(err.to_string(), "this is dummy error");
        }
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn io_error_during_fold_check_is_propagated() {
    let reader = EofErrorReader::new(&b"N:x\r\n"[..], ErrorKind::BrokenPipe, "pipe closed");
    let mut tokenizer = Tokenizer::from_reader(reader);

    assert_eq!(tokenizer.next_token().unwrap(), Some(Token::name("N")));
    assert!(matches!(
        tokenizer.next_token(),
        Err(TokenizeError::Io(err)) if err.kind() == ErrorKind::BrokenPipe
    ));
}

#[test]
fn io_error_while_reading_name_is_propagated() {
    let reader = EofErrorReader::new(&b"BEGIN"[..], ErrorKind::ConnectionReset, "reset");
    let mut tokenizer = Tokenizer::from_reader(reader);

    assert!(matches!(
        tokenizer.next_token(),
        Err(TokenizeError::Io(err)) if err.kind() == ErrorKind::ConnectionReset
    ));
    assert!(tokenizer.next().is_none());
}

#[test_log::test]
fn byte_by_byte_matches_whole_buffer() {
    let whole = collect_tokens(CARD, CARD.len(), TokenizerConfig::default()).unwrap();

    for chunk in 1..16 {
        let chunked = collect_tokens(CARD, chunk, TokenizerConfig::default()).unwrap();
        assert_eq!(chunked, whole, "chunk size {chunk}");
    }
}

#[test]
fn value_tokens_reassemble_input() {
    let tokens = collect_tokens(CARD, 3, TokenizerConfig::default()).unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(Token::kind).collect();
    assert_eq!(kinds.first(), Some(&TokenKind::Name));
    assert_eq!(
        kinds.iter().filter(|k| **k == TokenKind::Name).count(),
        7,
        "one name per logical line"
    );

    let folded = tokens
        .iter()
        .filter(|t| matches!(t, Token::Value(v) if v.continues))
        .count();
    assert_eq!(folded, 3);
}

#[test]
fn encoding_tracks_current_property() {
    let mut tokenizer = Tokenizer::new(BufReader::new(ChunkedReader::new(CARD, 2)));
    let mut seen = Vec::new();

    while let Some(token) = tokenizer.next_token().unwrap() {
        if let Token::Value(value) = token
            && !value.continues
        {
            seen.push(tokenizer.encoding());
        }
    }

    assert_eq!(
        seen,
        vec![
            Encoding::Raw,
            Encoding::Raw,
            Encoding::Raw,
            Encoding::Raw,
            Encoding::QuotedPrintable,
            Encoding::Base64,
            Encoding::Raw,
        ]
    );
}

#[test]
fn settings_drive_tokenizer() -> anyhow::Result<()> {
    let settings = Settings::from_toml_str("[tokenizer]\nfold_whitespace = \"preserve\"\n")?;
    let tokens = collect_tokens(b"FN:John\r\n  Doe\r\n", 1, settings.tokenizer)?;

    assert_eq!(
        tokens,
        vec![
            Token::name("FN"),
            Token::value("John\r\n", true),
            Token::value("  Doe\r\n", false),
        ]
    );
    Ok(())
}
