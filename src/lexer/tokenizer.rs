use std::sync::Arc;

use lazy_static::lazy_static;

use super::scanner::Scanner;
use super::states::{CommentStyle, TokenState};
use super::symbol::SymbolTrie;
use super::token::{Token, TokenKind};
use crate::error::{Error, Result};

static SYMBOL_STATE: TokenState = TokenState::Symbol;

lazy_static! {
    static ref STANDARD_TABLE: Arc<StateTable> = Arc::new(StateTable::standard());
}

/// Character range routed to one state
#[derive(Debug, Clone)]
struct StateRange {
    start: char,
    end: char,
    state: TokenState,
}

/// Maps characters to token states and holds the symbol trie
///
/// Ranges added later take precedence over earlier ones. Characters covered
/// by no range go to the symbol state. A table is built once and then shared
/// read-only between tokenizers.
#[derive(Debug, Clone)]
pub struct StateTable {
    ranges: Vec<StateRange>,
    symbols: SymbolTrie,
}

impl StateTable {
    /// Table that routes every character to the symbol state, with no symbols
    pub fn new() -> Self {
        StateTable {
            ranges: Vec::new(),
            symbols: SymbolTrie::new(),
        }
    }

    /// The standard configuration
    ///
    /// | Characters | State |
    /// |---|---|
    /// | `\0`..=` ` | whitespace |
    /// | letters, `\u{C0}`..=`\u{FFFD}` | word |
    /// | digits, `-`, `.` | number |
    /// | `"`, `'` | quote |
    /// | `/` | cpp comment |
    ///
    /// with `!=`, `<=`, `>=`, `<>`, `==`, `&&`, `||` and `:=` as symbols.
    pub fn standard() -> Self {
        let mut table = StateTable::new();
        table.set_state('\0', ' ', TokenState::whitespace());

        let word = TokenState::word();
        table.set_state('a', 'z', word.clone());
        table.set_state('A', 'Z', word.clone());
        table.set_state('\u{C0}', '\u{FF}', word.clone());
        table.set_state('\u{100}', '\u{FFFD}', word);

        table.set_state('0', '9', TokenState::number());
        table.set_char('-', TokenState::number());
        table.set_char('.', TokenState::number());

        table.set_char('"', TokenState::quote());
        table.set_char('\'', TokenState::quote());

        table.set_char('/', TokenState::comment(CommentStyle::Cpp));

        for symbol in ["!=", "<=", ">=", "<>", "==", "&&", "||", ":="] {
            table.add_symbol(symbol, TokenKind::Symbol);
        }
        table
    }

    /// Shared instance of [`StateTable::standard`]
    pub fn shared_standard() -> Arc<StateTable> {
        Arc::clone(&STANDARD_TABLE)
    }

    /// Routes `start..=end` to `state`
    pub fn set_state(&mut self, start: char, end: char, state: TokenState) {
        if start <= end {
            self.ranges.push(StateRange { start, end, state });
        }
    }

    /// Routes a single character to `state`
    pub fn set_char(&mut self, c: char, state: TokenState) {
        self.set_state(c, c, state);
    }

    /// Registers a multi-character symbol
    pub fn add_symbol(&mut self, text: &str, kind: TokenKind) {
        self.symbols.add(text, kind);
    }

    /// Registered symbols
    pub fn symbols(&self) -> &SymbolTrie {
        &self.symbols
    }

    /// State that handles tokens starting with `c`
    pub fn state_for(&self, c: char) -> &TokenState {
        self.ranges
            .iter()
            .rev()
            .find(|range| range.start <= c && c <= range.end)
            .map(|range| &range.state)
            .unwrap_or(&SYMBOL_STATE)
    }
}

impl Default for StateTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Splits text into tokens by dispatching each token's first character to a
/// state
///
/// The token sequence is finite: it ends with one `Eof` token. Concatenating
/// the text of all tokens gives back the input.
pub struct Tokenizer {
    scanner: Scanner,
    table: Arc<StateTable>,
    finished: bool,
}

impl Tokenizer {
    /// Tokenizer over `text` using the standard table
    pub fn new(text: &str) -> Self {
        Tokenizer::with_table(text, StateTable::shared_standard())
    }

    /// Tokenizer over `text` using a custom table
    pub fn with_table(text: &str, table: Arc<StateTable>) -> Self {
        Tokenizer {
            scanner: Scanner::new(text),
            table,
            finished: false,
        }
    }

    /// Produces the next token; at the end of input, an `Eof` token
    pub fn next_token(&mut self) -> Result<Token> {
        let Some(c) = self.scanner.peek() else {
            return Ok(Token::eof(self.scanner.peek_line(), self.scanner.peek_column()));
        };

        let state = self.table.state_for(c);
        let start = self.scanner.position();
        let token = state.produce_token(&mut self.scanner, &self.table)?;

        if self.scanner.position() == start {
            tracing::warn!(
                state = state.name(),
                line = self.scanner.peek_line(),
                column = self.scanner.peek_column(),
                "token state consumed no input"
            );
            return Err(Error::incorrect_state(state.name(), Some(c)));
        }

        tracing::trace!(
            kind = %token.kind,
            text = %token.text,
            line = token.line,
            column = token.column,
            "token"
        );
        Ok(token)
    }

    /// Produces every remaining token, the final `Eof` included
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                self.finished = true;
                return Ok(tokens);
            }
        }
    }

    /// Rewinds to the start of the text
    pub fn reset(&mut self) {
        self.scanner.reset();
        self.finished = false;
    }

    /// Underlying scanner
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Table used for dispatch
    pub fn table(&self) -> &Arc<StateTable> {
        &self.table
    }
}

impl Iterator for Tokenizer {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        match &result {
            Ok(token) if !token.is_eof() => {}
            _ => self.finished = true,
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::states::WhitespaceState;
    use crate::lexer::CharSet;

    fn kinds_and_texts(text: &str) -> Vec<(TokenKind, String)> {
        Tokenizer::new(text)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_standard_dispatch() {
        let table = StateTable::standard();
        assert_eq!(table.state_for(' ').name(), "whitespace");
        assert_eq!(table.state_for('q').name(), "word");
        assert_eq!(table.state_for('ü').name(), "word");
        assert_eq!(table.state_for('5').name(), "number");
        assert_eq!(table.state_for('-').name(), "number");
        assert_eq!(table.state_for('\'').name(), "quote");
        assert_eq!(table.state_for('/').name(), "cpp comment");
        assert_eq!(table.state_for('+').name(), "symbol");
        assert_eq!(table.state_for('\u{1F600}').name(), "symbol");
    }

    #[test]
    fn test_later_ranges_override() {
        let mut table = StateTable::standard();
        table.set_char('#', TokenState::comment(CommentStyle::Line('#')));
        table.set_char('x', TokenState::number());
        assert_eq!(table.state_for('#').name(), "line comment");
        assert_eq!(table.state_for('x').name(), "number");
        assert_eq!(table.state_for('y').name(), "word");
    }

    #[test]
    fn test_simple_expression() {
        let tokens = kinds_and_texts("a <= 10");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Word, "a".to_string()),
                (TokenKind::Whitespace, " ".to_string()),
                (TokenKind::Symbol, "<=".to_string()),
                (TokenKind::Whitespace, " ".to_string()),
                (TokenKind::Integer, "10".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_token_positions() {
        let tokens = Tokenizer::new("ab\ncd").tokenize().unwrap();
        let positions: Vec<_> = tokens.iter().map(|t| (t.line, t.column)).collect();
        assert_eq!(positions, vec![(1, 1), (2, 0), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_iterator_ends_after_eof() {
        let mut tokenizer = Tokenizer::new("x");
        let tokens: Vec<_> = tokenizer.by_ref().collect::<Result<_>>().unwrap();
        assert_eq!(tokens.len(), 2);
        assert!(tokenizer.next().is_none());

        tokenizer.reset();
        assert_eq!(tokenizer.count(), 2);
    }

    #[test]
    fn test_empty_input() {
        let tokens = kinds_and_texts("");
        assert_eq!(tokens, vec![(TokenKind::Eof, String::new())]);
    }

    #[test]
    fn test_stalled_state_is_reported() {
        let mut table = StateTable::new();
        table.set_char('x', TokenState::Whitespace(WhitespaceState::new(CharSet::new())));
        let mut tokenizer = Tokenizer::with_table("x", Arc::new(table));
        let err = tokenizer.next().unwrap().unwrap_err();
        assert!(matches!(err, Error::IncorrectStateUsage { .. }));
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn test_shared_table_is_reused() {
        let a = Tokenizer::new("a");
        let b = Tokenizer::new("b");
        assert!(Arc::ptr_eq(a.table(), b.table()));
    }
}
