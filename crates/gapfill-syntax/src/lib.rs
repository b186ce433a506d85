//! # gapfill-syntax
//!
//! Reader for the *language test format*: a small tag-based markup that
//! describes fill-in-the-gap exercises.
//!
//! ```text
//! <task>
//!   The <gap img="cat.png">cat</gap> sat on the <gap>mat</gap>.
//!   <extra>dog</extra>
//! </task>
//! ```
//!
//! ## Architecture Overview
//!
//! ```text
//! chars → Tokenizer → Tokens → Parser → Document
//!         (state machine)      (recursive descent, 1 token lookahead)
//! ```
//!
//! Both stages are streaming: the parser pulls tokens one at a time and the
//! tokenizer pulls characters one at a time. Nothing backtracks.
//!
//! ### Markup rules
//!
//! - Tags are `<name attr="value" ...>...</name>`. The recognised tags are
//!   `task`, `gap` and `extra`; `img` on `gap` is the only attribute that
//!   carries meaning.
//! - `&lt;`, `&gt;`, `&amp;` and `&quot;` decode to `<`, `>`, `&` and `"` in
//!   text and in attribute values. Any other entity is an error.
//! - Text outside a `task` is ignored.
//!
//! ## Module Structure
//!
//! ```text
//! gapfill-syntax/
//! ├── lib.rs          # This file - public API
//! ├── token.rs        # Token and TokenKind
//! ├── tokenizer.rs    # Finite state machine lexer, LexError
//! ├── document.rs     # Document, ParsedTask, ParsedGap
//! └── parser/
//!     ├── mod.rs      # Parser cursor, ParseError, parse()
//!     └── grammar.rs  # One function per production
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use gapfill_syntax::{parse, TaskElement};
//!
//! let doc = parse("<task>I <gap>like</gap> tea.<extra>hate</extra></task>").unwrap();
//! let task = &doc.tasks[0];
//!
//! assert_eq!(task.extra, vec!["hate".to_string()]);
//! assert_eq!(task.gaps().next().unwrap().answer, "like");
//! assert!(matches!(&task.content[0], TaskElement::Text(t) if t == "I "));
//! ```

pub mod document;
pub mod parser;
pub mod token;
pub mod tokenizer;

pub use document::{Document, ParsedGap, ParsedTask, TaskElement};
pub use parser::{ParseError, Parser, parse, parse_chars};
pub use token::{Token, TokenKind};
pub use tokenizer::{LexError, Status, Tokenizer, tokenize};
