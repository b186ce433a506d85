//! # Parser - Recursive Descent over Tokens
//!
//! The parser pulls tokens from a [`Tokenizer`] on demand and keeps a single
//! token of lookahead. Grammar rules live in [`grammar`]; this module holds
//! the token-level primitives they are written in terms of:
//!
//! - Inspect: `peek()`, `at()`
//! - Consume: `bump()`, `expect()`, `expect_text()`, `expect_keyword()`
//!
//! There is no error recovery. The first mismatch aborts the parse with a
//! [`ParseError`] naming what was expected and what was found, and a
//! tokenizer failure surfaces as [`ParseError::Lex`].
//!
//! ```
//! use gapfill_syntax::{parse, TaskElement};
//!
//! let doc = parse("<task><gap>red</gap> apple</task>").unwrap();
//! assert_eq!(doc.tasks.len(), 1);
//! assert!(matches!(doc.tasks[0].content[0], TaskElement::Gap(_)));
//! ```

mod grammar;

use thiserror::Error;

use crate::document::Document;
use crate::token::{Token, TokenKind};
use crate::tokenizer::{LexError, Tokenizer};

/// Why a parse was abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected a {expected} token, got {found} instead")]
    UnexpectedToken { expected: TokenKind, found: Token },

    #[error("expected an identifier (\"{expected}\"), got {found} instead")]
    ExpectedKeyword { expected: &'static str, found: Token },

    #[error("expected \"{expected}\", got \"{found}\" instead")]
    UnexpectedIdentifier {
        expected: &'static str,
        found: String,
    },

    #[error("expected a \"gap\" or \"extra\" tag, got \"{found}\" instead")]
    UnexpectedTag { found: String },

    #[error("expected text or a tag, got {found} instead")]
    UnexpectedTopLevel { found: Token },

    #[error("unexpected end of token stream")]
    UnexpectedEnd,
}

/// Token cursor with one token of lookahead.
pub struct Parser<I: Iterator<Item = char>> {
    tokens: Tokenizer<I>,
    lookahead: Option<Token>,
}

impl<I: Iterator<Item = char>> Parser<I> {
    pub fn new(tokens: Tokenizer<I>) -> Self {
        Self {
            tokens,
            lookahead: None,
        }
    }

    /// Parse the whole token stream into a document.
    pub fn parse(mut self) -> Result<Document, ParseError> {
        grammar::document(&mut self)
    }

    fn fetch(&mut self) -> Result<Token, ParseError> {
        match self.tokens.read() {
            Some(token) => Ok(token),
            None => Err(match self.tokens.error() {
                Some(err) => ParseError::Lex(err.clone()),
                None => ParseError::UnexpectedEnd,
            }),
        }
    }

    /// Look at the next token without consuming it.
    pub(crate) fn peek(&mut self) -> Result<&Token, ParseError> {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.fetch()?,
        };
        Ok(&*self.lookahead.insert(token))
    }

    /// Check whether the next token is of the given kind.
    pub(crate) fn at(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        Ok(self.peek()?.kind() == kind)
    }

    /// Consume the next token unconditionally.
    pub(crate) fn bump(&mut self) -> Result<Token, ParseError> {
        match self.lookahead.take() {
            Some(token) => Ok(token),
            None => self.fetch(),
        }
    }

    /// Consume a token of the given kind.
    pub(crate) fn expect(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        let found = self.bump()?;
        if found.kind() != expected {
            return Err(ParseError::UnexpectedToken { expected, found });
        }
        Ok(found)
    }

    /// Consume a payload-carrying token and return its text.
    pub(crate) fn expect_text(&mut self, expected: TokenKind) -> Result<String, ParseError> {
        let token = self.expect(expected)?;
        Ok(token.into_text().unwrap_or_default())
    }

    /// Consume an identifier that must spell `keyword`.
    pub(crate) fn expect_keyword(&mut self, keyword: &'static str) -> Result<(), ParseError> {
        match self.bump()? {
            Token::Identifier(name) if name == keyword => Ok(()),
            Token::Identifier(name) => Err(ParseError::UnexpectedIdentifier {
                expected: keyword,
                found: name,
            }),
            found => Err(ParseError::ExpectedKeyword {
                expected: keyword,
                found,
            }),
        }
    }
}

/// Parse markup from any character source.
pub fn parse_chars(chars: impl IntoIterator<Item = char>) -> Result<Document, ParseError> {
    let document = Parser::new(Tokenizer::new(chars)).parse()?;
    log::debug!("parsed document with {} task(s)", document.tasks.len());
    Ok(document)
}

/// Parse markup from a string.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    parse_chars(source.chars())
}
