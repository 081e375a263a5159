//! # Lexicalc - Tokenizer and Calculator Core
//!
//! Building blocks for expression languages: a backtracking character
//! scanner, a pluggable tokenizer driven by a character-range state table, a
//! longest-match symbol trie, and a dynamically typed value with a library of
//! calculator functions.
//!
//! ## Features
//!
//! - **Lossless tokens** - concatenating every token's text gives back the input
//! - **Exact positions** - line and column survive unread across CR, LF and CRLF
//! - **Pluggable states** - whitespace, word, number, quote and comment states
//!   routed by character ranges
//! - **Longest-match symbols** - multi-character operators via a symbol trie
//! - **Variant values** - ten value types with documented coercion rules
//! - **Function library** - Min, Max, Sum, Choose, If, date and math functions
//!
//! ## Quick Start
//!
//! ```rust
//! use lexicalc::{TokenKind, Tokenizer};
//!
//! # fn main() -> lexicalc::Result<()> {
//! let tokens = Tokenizer::new("total <= 10").tokenize()?;
//! let kinds: Vec<TokenKind> = tokens
//!     .iter()
//!     .filter(|t| !t.kind.is_trivia())
//!     .map(|t| t.kind)
//!     .collect();
//!
//! assert_eq!(
//!     kinds,
//!     vec![TokenKind::Word, TokenKind::Symbol, TokenKind::Integer, TokenKind::Eof]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ### Calling Functions
//!
//! ```rust
//! use lexicalc::{Coercion, FunctionCollection, Variant};
//!
//! # fn main() -> lexicalc::Result<()> {
//! let functions = FunctionCollection::new();
//! let ops = Coercion::new();
//!
//! let sum = functions.evaluate("Sum", &[Variant::Int32(1), Variant::Int32(2)], &ops)?;
//! assert_eq!(sum, Variant::Int32(3));
//!
//! let picked = functions.evaluate(
//!     "choose",
//!     &[Variant::Int32(1), "a".into(), "b".into(), "c".into()],
//!     &ops,
//! )?;
//! assert_eq!(picked, Variant::string("b"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Custom Tables
//!
//! ```rust
//! use std::sync::Arc;
//! use lexicalc::{CommentStyle, StateTable, TokenKind, TokenState, Tokenizer};
//!
//! # fn main() -> lexicalc::Result<()> {
//! let mut table = StateTable::standard();
//! table.set_char('#', TokenState::comment(CommentStyle::Line('#')));
//! table.add_symbol("=>", TokenKind::Special);
//!
//! let tokens = Tokenizer::with_table("a => b # done", Arc::new(table)).tokenize()?;
//! assert_eq!(tokens[2].kind, TokenKind::Special);
//! assert_eq!(tokens[6].text, "# done");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Function errors carry a stable code and never disturb tokenizer state:
//!
//! ```rust
//! use lexicalc::{Coercion, ErrorCode, FunctionCollection, Variant};
//!
//! let functions = FunctionCollection::new();
//! let err = functions
//!     .evaluate("Min", &[Variant::Int32(1)], &Coercion::new())
//!     .unwrap_err();
//! assert_eq!(err.code(), ErrorCode::WrongParamCount);
//! ```
//!
//! ## Logging
//!
//! Diagnostics are emitted through `tracing`; no subscriber is installed.
//!
//! ## License
//! Licensed under the [MIT License](https://opensource.org/licenses/MIT).

#![warn(missing_docs)]

/// Version of the Lexicalc library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod functions;
pub mod lexer;
pub mod runtime;

// Re-export main types
pub use error::{Error, ErrorCode, ErrorSeverity, Result};
pub use functions::{check_arity, Arity, DelegatedFunction, Function, FunctionCollection};
pub use lexer::{
    CharSet, CommentStyle, PushbackReader, Scanner, StateTable, Token, TokenKind, TokenState,
    Tokenizer,
};
pub use runtime::{Coercion, Variant, VariantType};
