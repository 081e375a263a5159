use super::whitespace::read_run;
use crate::lexer::char_set::CharSet;
use crate::lexer::scanner::Scanner;
use crate::lexer::token::{Token, TokenKind};

/// Consumes a maximal run of word characters
#[derive(Debug, Clone)]
pub struct WordState {
    chars: CharSet,
}

impl WordState {
    /// Word state over a custom character set
    pub fn new(chars: CharSet) -> Self {
        WordState { chars }
    }

    /// Characters allowed inside a word
    pub fn chars(&self) -> &CharSet {
        &self.chars
    }

    pub(crate) fn produce_token(&self, scanner: &mut Scanner) -> Token {
        let line = scanner.peek_line();
        let column = scanner.peek_column();
        let text = read_run(scanner, &self.chars);
        Token::new(TokenKind::Word, text, line, column)
    }
}

impl Default for WordState {
    fn default() -> Self {
        WordState::new(CharSet::word())
    }
}
