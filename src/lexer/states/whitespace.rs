use crate::lexer::char_set::CharSet;
use crate::lexer::scanner::Scanner;
use crate::lexer::token::{Token, TokenKind};

/// Consumes a maximal run of whitespace characters
///
/// Entering this state on a non-whitespace character yields an empty token;
/// the state table is expected to route only whitespace here.
#[derive(Debug, Clone)]
pub struct WhitespaceState {
    chars: CharSet,
}

impl WhitespaceState {
    /// Whitespace state over a custom character set
    pub fn new(chars: CharSet) -> Self {
        WhitespaceState { chars }
    }

    /// Characters treated as whitespace
    pub fn chars(&self) -> &CharSet {
        &self.chars
    }

    pub(crate) fn produce_token(&self, scanner: &mut Scanner) -> Token {
        let line = scanner.peek_line();
        let column = scanner.peek_column();
        let text = read_run(scanner, &self.chars);
        Token::new(TokenKind::Whitespace, text, line, column)
    }
}

impl Default for WhitespaceState {
    fn default() -> Self {
        WhitespaceState::new(CharSet::whitespace())
    }
}

/// Reads characters while they belong to `chars`, unreading the first one
/// that does not (or the end-of-input read)
pub(super) fn read_run(scanner: &mut Scanner, chars: &CharSet) -> String {
    let mut text = String::new();
    loop {
        match scanner.read() {
            Some(c) if chars.contains(c) => text.push(c),
            _ => {
                scanner.unread();
                return text;
            }
        }
    }
}
