use crate::lexer::scanner::Scanner;
use crate::lexer::token::{Token, TokenKind};

/// Reads a string delimited by its first character
///
/// There are no escape sequences. An unterminated string runs to the end of
/// input and is returned as captured.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteState;

impl QuoteState {
    pub(crate) fn produce_token(&self, scanner: &mut Scanner) -> Token {
        let line = scanner.peek_line();
        let column = scanner.peek_column();

        let mut text = String::new();
        let Some(delim) = scanner.read() else {
            scanner.unread();
            return Token::eof(line, column);
        };
        text.push(delim);

        while let Some(c) = scanner.read() {
            text.push(c);
            if c == delim {
                break;
            }
        }
        if scanner.position() == scanner.len() as isize {
            // Unterminated: give back the end-of-input read
            scanner.unread();
        }

        Token::new(TokenKind::Quoted, text, line, column)
    }

    /// Wraps `value` in `delim` on both sides
    pub fn encode(value: &str, delim: char) -> String {
        let mut text = String::with_capacity(value.len() + 2);
        text.push(delim);
        text.push_str(value);
        text.push(delim);
        text
    }

    /// Strips `delim` from both ends, only when it is present on both ends
    pub fn decode(text: &str, delim: char) -> String {
        let inner = text
            .strip_prefix(delim)
            .and_then(|rest| rest.strip_suffix(delim));
        match inner {
            Some(inner) => inner.to_string(),
            None => text.to_string(),
        }
    }
}
