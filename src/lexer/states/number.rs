use crate::lexer::scanner::Scanner;
use crate::lexer::token::{Token, TokenKind};
use crate::lexer::tokenizer::StateTable;

/// Reads `-?digits(.digits)?`
///
/// A `.` not followed by a digit ends the number before it. When no digit is
/// read at all (a lone `-` or `.`), every character read is unread and the
/// symbol state produces the token instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberState;

impl NumberState {
    pub(crate) fn produce_token(&self, scanner: &mut Scanner, table: &StateTable) -> Token {
        let line = scanner.peek_line();
        let column = scanner.peek_column();

        let mut text = String::new();
        let mut digits = 0;
        let mut is_float = false;

        let mut c = scanner.read();
        if c == Some('-') {
            text.push('-');
            c = scanner.read();
        }
        while let Some(d) = c.filter(char::is_ascii_digit) {
            text.push(d);
            digits += 1;
            c = scanner.read();
        }

        if c == Some('.') {
            let fraction = read_digits(scanner);
            if fraction.is_empty() {
                scanner.unread();
            } else {
                is_float = true;
                digits += fraction.len();
                text.push('.');
                text.push_str(&fraction);
            }
        } else {
            scanner.unread();
        }

        if digits == 0 {
            scanner.unread_many(text.chars().count());
            tracing::debug!(line, column, "number state fell back to symbol");
            return table.symbols().next_token(scanner);
        }

        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Integer
        };
        Token::new(kind, text, line, column)
    }
}

/// Reads a run of ASCII digits, unreading the character that ends it
fn read_digits(scanner: &mut Scanner) -> String {
    let mut digits = String::new();
    loop {
        match scanner.read() {
            Some(d) if d.is_ascii_digit() => digits.push(d),
            _ => {
                scanner.unread();
                return digits;
            }
        }
    }
}
