//! Lexical analysis for Lexicalc
//!
//! Converts source text into a stream of positioned tokens. A [`Scanner`]
//! supplies characters with unread support, a [`Tokenizer`] dispatches on the
//! first character of each token through a [`StateTable`], and the chosen
//! state consumes the token.

mod char_set;
mod pushback;
mod scanner;
pub mod states;
mod symbol;
mod token;
mod tokenizer;

pub use char_set::CharSet;
pub use pushback::PushbackReader;
pub use scanner::Scanner;
pub use states::{
    CommentState, CommentStyle, NumberState, QuoteState, TokenState, WhitespaceState, WordState,
};
pub use symbol::{NodeId, SymbolNode, SymbolTrie};
pub use token::{Token, TokenKind};
pub use tokenizer::{StateTable, Tokenizer};
