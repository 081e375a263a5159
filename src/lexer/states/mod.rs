//! Token states
//!
//! Each state consumes characters from the cursor according to its own
//! grammar and returns exactly one token. The tokenizer picks the state from
//! the first character through its [`StateTable`].

mod comment;
mod number;
mod quote;
mod whitespace;
mod word;

pub use comment::{CommentState, CommentStyle};
pub use number::NumberState;
pub use quote::QuoteState;
pub use whitespace::WhitespaceState;
pub use word::WordState;

use super::scanner::Scanner;
use super::token::Token;
use super::tokenizer::StateTable;
use crate::error::Result;

/// Closed set of token states
#[derive(Debug, Clone)]
pub enum TokenState {
    /// Runs of whitespace
    Whitespace(WhitespaceState),
    /// Runs of word characters
    Word(WordState),
    /// Integers and decimals, falling back to symbols
    Number(NumberState),
    /// Delimited strings
    Quote(QuoteState),
    /// Line and block comments
    Comment(CommentState),
    /// Longest registered symbol or a single character
    Symbol,
}

impl TokenState {
    /// Consumes one token starting at the cursor
    pub fn produce_token(&self, scanner: &mut Scanner, table: &StateTable) -> Result<Token> {
        match self {
            TokenState::Whitespace(state) => Ok(state.produce_token(scanner)),
            TokenState::Word(state) => Ok(state.produce_token(scanner)),
            TokenState::Number(state) => Ok(state.produce_token(scanner, table)),
            TokenState::Quote(state) => Ok(state.produce_token(scanner)),
            TokenState::Comment(state) => state.produce_token(scanner, table),
            TokenState::Symbol => Ok(table.symbols().next_token(scanner)),
        }
    }

    /// Short name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            TokenState::Whitespace(_) => "whitespace",
            TokenState::Word(_) => "word",
            TokenState::Number(_) => "number",
            TokenState::Quote(_) => "quote",
            TokenState::Comment(state) => state.style().name(),
            TokenState::Symbol => "symbol",
        }
    }

    /// Default whitespace state
    pub fn whitespace() -> Self {
        TokenState::Whitespace(WhitespaceState::default())
    }

    /// Default word state
    pub fn word() -> Self {
        TokenState::Word(WordState::default())
    }

    /// Number state
    pub fn number() -> Self {
        TokenState::Number(NumberState)
    }

    /// Quote state
    pub fn quote() -> Self {
        TokenState::Quote(QuoteState)
    }

    /// Comment state of the given style
    pub fn comment(style: CommentStyle) -> Self {
        TokenState::Comment(CommentState::new(style))
    }
}
