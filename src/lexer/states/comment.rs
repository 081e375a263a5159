use crate::error::{Error, Result};
use crate::lexer::scanner::Scanner;
use crate::lexer::token::{Token, TokenKind};
use crate::lexer::tokenizer::StateTable;

/// Comment syntax recognised by a [`CommentState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// Trigger character, then everything up to the end of the line
    Line(char),
    /// `// ...` and `/* ... */`
    Cpp,
    /// `/* ... */` only
    C,
}

impl CommentStyle {
    /// Short name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            CommentStyle::Line(_) => "line comment",
            CommentStyle::Cpp => "cpp comment",
            CommentStyle::C => "c comment",
        }
    }

    fn trigger(&self) -> char {
        match self {
            CommentStyle::Line(trigger) => *trigger,
            CommentStyle::Cpp | CommentStyle::C => '/',
        }
    }
}

/// Reads a comment, markers included
///
/// For the slash styles a `/` that does not open a comment is handed to the
/// symbol state. Unterminated block comments run to the end of input.
#[derive(Debug, Clone)]
pub struct CommentState {
    style: CommentStyle,
}

impl CommentState {
    /// Comment state of the given style
    pub fn new(style: CommentStyle) -> Self {
        CommentState { style }
    }

    /// Syntax this state recognises
    pub fn style(&self) -> CommentStyle {
        self.style
    }

    pub(crate) fn produce_token(&self, scanner: &mut Scanner, table: &StateTable) -> Result<Token> {
        let line = scanner.peek_line();
        let column = scanner.peek_column();

        let trigger = self.style.trigger();
        let found = scanner.peek();
        if found != Some(trigger) {
            return Err(Error::incorrect_state(self.style.name(), found));
        }
        scanner.read();

        let mut text = String::from(trigger);
        match self.style {
            CommentStyle::Line(_) => read_to_line_end(scanner, &mut text),
            CommentStyle::Cpp | CommentStyle::C => match scanner.read() {
                Some('*') => {
                    text.push('*');
                    read_to_block_end(scanner, &mut text);
                }
                Some('/') if self.style == CommentStyle::Cpp => {
                    text.push('/');
                    read_to_line_end(scanner, &mut text);
                }
                _ => {
                    scanner.unread_many(2);
                    tracing::debug!(line, column, "comment state fell back to symbol");
                    return Ok(table.symbols().next_token(scanner));
                }
            },
        }

        Ok(Token::new(TokenKind::Comment, text, line, column))
    }
}

/// Reads up to, not including, the next CR or LF
fn read_to_line_end(scanner: &mut Scanner, text: &mut String) {
    loop {
        match scanner.read() {
            Some(c) if c != '\n' && c != '\r' => text.push(c),
            _ => {
                scanner.unread();
                return;
            }
        }
    }
}

/// Reads through the closing `*/`, or to the end of input
fn read_to_block_end(scanner: &mut Scanner, text: &mut String) {
    let mut previous = None;
    loop {
        match scanner.read() {
            Some(c) => {
                text.push(c);
                if previous == Some('*') && c == '/' {
                    return;
                }
                previous = Some(c);
            }
            None => {
                scanner.unread();
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorSeverity;

    fn comment(style: CommentStyle, text: &str) -> (Result<Token>, Scanner) {
        let table = StateTable::standard();
        let mut scanner = Scanner::new(text);
        let token = CommentState::new(style).produce_token(&mut scanner, &table);
        (token, scanner)
    }

    #[test]
    fn test_line_comment() {
        let (token, scanner) = comment(CommentStyle::Line('#'), "# note\r\nx");
        let token = token.unwrap();
        assert_eq!(token.kind, TokenKind::Comment);
        assert_eq!(token.text, "# note");
        assert_eq!(scanner.peek(), Some('\r'));
    }

    #[test]
    fn test_cpp_comments() {
        let (token, scanner) = comment(CommentStyle::Cpp, "// to end\nx");
        assert_eq!(token.unwrap().text, "// to end");
        assert_eq!(scanner.peek(), Some('\n'));

        let (token, scanner) = comment(CommentStyle::Cpp, "/* a */b");
        assert_eq!(token.unwrap().text, "/* a */");
        assert_eq!(scanner.peek(), Some('b'));

        let (token, _) = comment(CommentStyle::Cpp, "/**/");
        assert_eq!(token.unwrap().text, "/**/");

        let (token, _) = comment(CommentStyle::Cpp, "/*/ x */");
        assert_eq!(token.unwrap().text, "/*/ x */");
    }

    #[test]
    fn test_unterminated_block() {
        let (token, scanner) = comment(CommentStyle::C, "/* open *");
        assert_eq!(token.unwrap().text, "/* open *");
        assert!(scanner.is_at_end());
        assert_eq!(scanner.position(), 8);
    }

    #[test]
    fn test_slash_falls_back_to_symbol() {
        let (token, scanner) = comment(CommentStyle::Cpp, "/x");
        let token = token.unwrap();
        assert_eq!((token.kind, token.text.as_str()), (TokenKind::Symbol, "/"));
        assert_eq!(scanner.peek(), Some('x'));

        let (token, scanner) = comment(CommentStyle::C, "//x");
        assert_eq!(token.unwrap().text, "/");
        assert_eq!(scanner.peek(), Some('/'));

        let (token, scanner) = comment(CommentStyle::Cpp, "/");
        assert_eq!(token.unwrap().text, "/");
        assert!(scanner.is_at_end());
    }

    #[test]
    fn test_wrong_trigger_is_fatal() {
        let (token, scanner) = comment(CommentStyle::C, "#x");
        let err = token.unwrap_err();
        assert!(matches!(err, Error::IncorrectStateUsage { .. }));
        assert_eq!(err.classify(), ErrorSeverity::Fatal);
        assert_eq!(scanner.position(), -1);
    }
}
