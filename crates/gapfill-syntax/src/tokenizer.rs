//! # Tokenizer - Streaming Markup Lexer
//!
//! Turns a character stream into [`Token`]s using an explicit finite state
//! machine. Each call to `step` consumes at most one character and may push
//! tokens onto an output queue.
//!
//! ```text
//!            '&'              ';'
//!  Default ──────▶ Entity ──────────▶ Default
//!     │ '<'
//!     ▼      '/'? / other
//!    Lt ─────────────────▶ InTag ──'"'──▶ Quoted ──'&'──▶ QuotedEntity
//!                            ▲  '>'         │ '"'              │ ';'
//!                            │  └─▶ Default  │                  ▼
//!                            └──────────────┘               Quoted
//! ```
//!
//! The tokenizer keeps at least one token buffered while its status is
//! [`Status::Available`], and reads ahead by at most two tokens so the parser
//! gets one token of lookahead without the tokenizer re-reading input.
//!
//! Errors are fatal: once a [`LexError`] is recorded no more tokens are
//! produced beyond the ones already queued.

use std::collections::VecDeque;
use std::iter::Peekable;
use std::mem;

use thiserror::Error;

use crate::token::Token;

/// A lexical error. Fatal to the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unfinished entity \"&{0}\"")]
    UnfinishedEntity(String),

    #[error("invalid entity \"&{0};\"")]
    InvalidEntity(String),

    #[error("invalid character inside a tag: {0:?}")]
    InvalidTagCharacter(char),

    #[error("unfinished quoted string: \"{0}\"")]
    UnfinishedQuoted(String),
}

/// Observable tokenizer status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// At least one more token can be read.
    Available,
    /// All tokens were read and the input was well formed.
    Completed,
    /// All tokens that precede the error were read.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    Entity,
    Lt,
    InTag,
    Quoted,
    QuotedEntity,
}

/// Where a decoded entity goes and which state resumes afterwards.
#[derive(Debug, Clone, Copy)]
enum EntityTarget {
    Text,
    Quoted,
}

impl EntityTarget {
    fn resume(self) -> State {
        match self {
            EntityTarget::Text => State::Default,
            EntityTarget::Quoted => State::Quoted,
        }
    }
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        _ => None,
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Streaming tokenizer over any character source.
pub struct Tokenizer<I: Iterator<Item = char>> {
    input: Peekable<I>,
    output: VecDeque<Token>,
    state: State,
    /// `None` while more input may be processed.
    outcome: Option<Result<(), LexError>>,

    text: String,
    entity: String,
    identifier: String,
    quoted: String,
}

impl<'a> Tokenizer<std::str::Chars<'a>> {
    /// Tokenize a string slice.
    pub fn from_text(source: &'a str) -> Self {
        Self::new(source.chars())
    }
}

impl<I: Iterator<Item = char>> Tokenizer<I> {
    /// Create a tokenizer and read the first token (or fail trying).
    pub fn new(input: impl IntoIterator<IntoIter = I>) -> Self {
        let mut tokenizer = Self {
            input: input.into_iter().peekable(),
            output: VecDeque::with_capacity(2),
            state: State::Default,
            outcome: None,
            text: String::new(),
            entity: String::new(),
            identifier: String::new(),
            quoted: String::new(),
        };
        tokenizer.fill(1);
        tokenizer
    }

    /// Current status.
    ///
    /// Buffered tokens hide an internal end of input or error: the status
    /// only turns `Completed`/`Failed` once the queue is drained.
    pub fn status(&self) -> Status {
        if !self.output.is_empty() {
            return Status::Available;
        }
        match self.outcome {
            None => Status::Available,
            Some(Ok(())) => Status::Completed,
            Some(Err(_)) => Status::Failed,
        }
    }

    /// The error, once the status is `Failed`.
    pub fn error(&self) -> Option<&LexError> {
        match (&self.outcome, self.output.is_empty()) {
            (Some(Err(err)), true) => Some(err),
            _ => None,
        }
    }

    /// Read the next token, or `None` when the status is not `Available`.
    pub fn read(&mut self) -> Option<Token> {
        self.fill(2);
        self.output.pop_front()
    }

    fn fill(&mut self, buffered: usize) {
        while self.outcome.is_none() && self.output.len() < buffered {
            self.step();
        }
    }

    fn emit(&mut self, token: Token) {
        self.output.push_back(token);
    }

    fn fail(&mut self, err: LexError) {
        log::trace!("tokenizer failed in state {:?}: {err}", self.state);
        self.outcome = Some(Err(err));
    }

    fn finish(&mut self) {
        self.emit(Token::EndOfFile);
        self.outcome = Some(Ok(()));
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = mem::take(&mut self.text);
            self.emit(Token::Text(text));
        }
    }

    fn flush_identifier(&mut self) {
        if !self.identifier.is_empty() {
            let identifier = mem::take(&mut self.identifier);
            self.emit(Token::Identifier(identifier));
        }
    }

    fn step(&mut self) {
        match self.state {
            State::Default => self.step_default(),
            State::Entity => self.step_entity(EntityTarget::Text),
            State::Lt => self.step_lt(),
            State::InTag => self.step_in_tag(),
            State::Quoted => self.step_quoted(),
            State::QuotedEntity => self.step_entity(EntityTarget::Quoted),
        }
    }

    fn step_default(&mut self) {
        let Some(c) = self.input.next() else {
            self.flush_text();
            self.finish();
            return;
        };

        match c {
            '&' => self.state = State::Entity,
            '<' => {
                self.flush_text();
                self.state = State::Lt;
            }
            _ => self.text.push(c),
        }
    }

    fn step_entity(&mut self, target: EntityTarget) {
        let Some(c) = self.input.next() else {
            let name = mem::take(&mut self.entity);
            self.fail(LexError::UnfinishedEntity(name));
            return;
        };

        if c != ';' {
            self.entity.push(c);
            return;
        }

        let name = mem::take(&mut self.entity);
        match decode_entity(&name) {
            Some(decoded) => {
                match target {
                    EntityTarget::Text => self.text.push(decoded),
                    EntityTarget::Quoted => self.quoted.push(decoded),
                }
                self.state = target.resume();
            }
            None => self.fail(LexError::InvalidEntity(name)),
        }
    }

    fn step_lt(&mut self) {
        // A trailing `<` is tolerated as a bare tag start.
        let Some(&c) = self.input.peek() else {
            self.emit(Token::TagStart);
            self.finish();
            return;
        };

        self.state = State::InTag;
        if c == '/' {
            self.input.next();
            self.emit(Token::ClosingTagStart);
        } else {
            self.emit(Token::TagStart);
        }
    }

    fn step_in_tag(&mut self) {
        let Some(c) = self.input.next() else {
            self.flush_identifier();
            self.finish();
            return;
        };

        match c {
            '=' => {
                self.flush_identifier();
                self.emit(Token::Equals);
            }
            '"' => {
                self.flush_identifier();
                self.state = State::Quoted;
            }
            '>' => {
                self.flush_identifier();
                self.emit(Token::TagEnd);
                self.state = State::Default;
            }
            c if c.is_whitespace() => self.flush_identifier(),
            c if is_identifier_char(c) => self.identifier.push(c),
            c => self.fail(LexError::InvalidTagCharacter(c)),
        }
    }

    fn step_quoted(&mut self) {
        let Some(c) = self.input.next() else {
            let value = mem::take(&mut self.quoted);
            self.fail(LexError::UnfinishedQuoted(value));
            return;
        };

        match c {
            '&' => self.state = State::QuotedEntity,
            '"' => {
                let value = mem::take(&mut self.quoted);
                self.emit(Token::Quoted(value));
                self.state = State::InTag;
            }
            _ => self.quoted.push(c),
        }
    }
}

impl<I: Iterator<Item = char>> Iterator for Tokenizer<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.read()
    }
}

/// Tokenize a whole string, stopping at the first lexical error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokenizer = Tokenizer::from_text(source);
    let tokens: Vec<Token> = tokenizer.by_ref().collect();
    match tokenizer.error() {
        Some(err) => Err(err.clone()),
        None => Ok(tokens),
    }
}
