//! Lexical tokens of the language test format.
//!
//! The tokenizer produces [`Token`]s; the parser matches on [`TokenKind`]
//! when it only cares about the shape of the next token and not its text.

use std::fmt;

/// Token kinds without their payload.
///
/// Used by the parser to say which kind of token it expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `<`
    TagStart,
    /// `</`
    ClosingTagStart,
    /// `>`
    TagEnd,
    /// `=` inside a tag
    Equals,
    /// Tag or attribute name
    Identifier,
    /// Attribute value between double quotes
    Quoted,
    /// Literal text outside of tags
    Text,
    /// End of input
    EndOfFile,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::TagStart => "TagStart",
            TokenKind::ClosingTagStart => "ClosingTagStart",
            TokenKind::TagEnd => "TagEnd",
            TokenKind::Equals => "Equals",
            TokenKind::Identifier => "Identifier",
            TokenKind::Quoted => "Quoted",
            TokenKind::Text => "Text",
            TokenKind::EndOfFile => "EndOfFile",
        };
        f.write_str(name)
    }
}

/// A lexical token with its decoded text, if any.
///
/// Entities are already decoded in `Quoted` and `Text` payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    TagStart,
    ClosingTagStart,
    TagEnd,
    Equals,
    Identifier(String),
    Quoted(String),
    Text(String),
    EndOfFile,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::TagStart => TokenKind::TagStart,
            Token::ClosingTagStart => TokenKind::ClosingTagStart,
            Token::TagEnd => TokenKind::TagEnd,
            Token::Equals => TokenKind::Equals,
            Token::Identifier(_) => TokenKind::Identifier,
            Token::Quoted(_) => TokenKind::Quoted,
            Token::Text(_) => TokenKind::Text,
            Token::EndOfFile => TokenKind::EndOfFile,
        }
    }

    /// The token's text payload, for the kinds that carry one.
    pub fn text(&self) -> Option<&str> {
        match self {
            Token::Identifier(s) | Token::Quoted(s) | Token::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Consume the token, returning its payload.
    pub fn into_text(self) -> Option<String> {
        match self {
            Token::Identifier(s) | Token::Quoted(s) | Token::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text() {
            Some(text) => write!(f, "{} ({})", self.kind(), text),
            None => write!(f, "{}", self.kind()),
        }
    }
}
