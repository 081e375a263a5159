use serde::{Deserialize, Serialize};

use super::states::QuoteState;
use crate::runtime::Variant;

/// A single token from the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Exact text of the token, delimiters included
    pub text: String,
    /// Line of the first character (1-indexed)
    pub line: usize,
    /// Column of the first character, as reported by the scanner
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// Creates the end-of-input token
    pub fn eof(line: usize, column: usize) -> Self {
        Token::new(TokenKind::Eof, String::new(), line, column)
    }

    /// Returns true for the end-of-input token
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Converts the token into the value it denotes.
    ///
    /// Numbers become `Int64`/`Float64` (integers too large for `i64` fall back
    /// to `Float64`), quoted strings lose their matching delimiters, trivia and
    /// the end marker become `Null`, everything else is its own text.
    pub fn to_variant(&self) -> Variant {
        match self.kind {
            TokenKind::Integer => match self.text.parse::<i64>() {
                Ok(n) => Variant::Int64(n),
                Err(_) => self
                    .text
                    .parse::<f64>()
                    .map(Variant::Float64)
                    .unwrap_or(Variant::Null),
            },
            TokenKind::Float => self
                .text
                .parse::<f64>()
                .map(Variant::Float64)
                .unwrap_or(Variant::Null),
            TokenKind::Quoted => match self.text.chars().next() {
                Some(delim) => Variant::String(QuoteState::decode(&self.text, delim)),
                None => Variant::String(String::new()),
            },
            TokenKind::Word | TokenKind::Symbol | TokenKind::Special | TokenKind::Unknown => {
                Variant::String(self.text.clone())
            }
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::Eof => Variant::Null,
        }
    }
}

/// All token classifications produced by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Run of whitespace characters
    Whitespace,
    /// Run of word characters
    Word,
    /// Number without a decimal point
    Integer,
    /// Number with a decimal point
    Float,
    /// Single character or registered multi-character symbol
    Symbol,
    /// Quoted string, delimiters included
    Quoted,
    /// Comment, markers included
    Comment,
    /// End of input marker
    Eof,
    /// Symbol registered with a host-defined meaning
    Special,
    /// Unclassified
    Unknown,
}

impl TokenKind {
    /// Whitespace and comments carry no meaning for an expression parser
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }

    /// Integer or Float
    pub fn is_number(&self) -> bool {
        matches!(self, TokenKind::Integer | TokenKind::Float)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}({:?}) at {}:{}", self.kind, self.text, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivia_detection() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(TokenKind::Comment.is_trivia());
        assert!(!TokenKind::Word.is_trivia());
        assert!(TokenKind::Float.is_number());
        assert!(!TokenKind::Symbol.is_number());
    }

    #[test]
    fn test_to_variant() {
        assert_eq!(
            Token::new(TokenKind::Integer, "-42", 1, 1).to_variant(),
            Variant::Int64(-42)
        );
        assert_eq!(
            Token::new(TokenKind::Float, "2.5", 1, 1).to_variant(),
            Variant::Float64(2.5)
        );
        assert_eq!(
            Token::new(TokenKind::Integer, "99999999999999999999", 1, 1).to_variant(),
            Variant::Float64(99999999999999999999.0)
        );
        assert_eq!(
            Token::new(TokenKind::Quoted, "'abc'", 1, 1).to_variant(),
            Variant::String("abc".to_string())
        );
        // Unterminated quote keeps the opening delimiter
        assert_eq!(
            Token::new(TokenKind::Quoted, "'abc", 1, 1).to_variant(),
            Variant::String("'abc".to_string())
        );
        assert_eq!(
            Token::new(TokenKind::Comment, "// x", 1, 1).to_variant(),
            Variant::Null
        );
    }

    #[test]
    fn test_display() {
        let token = Token::new(TokenKind::Symbol, "<=", 2, 3);
        assert_eq!(token.to_string(), "Symbol(\"<=\") at 2:3");
    }
}
