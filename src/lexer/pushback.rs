use std::io::Read;

use crate::error::Result;

/// Character source with unlimited pushback and no position tracking
///
/// Pushed-back characters are served first, most recent first, before the
/// underlying source is consulted again.
pub struct PushbackReader<I: Iterator<Item = char>> {
    source: I,
    pushback: Vec<char>,
}

impl<I: Iterator<Item = char>> PushbackReader<I> {
    /// Layers a pushback buffer in front of a character iterator
    pub fn new(source: I) -> Self {
        PushbackReader {
            source,
            pushback: Vec::new(),
        }
    }

    /// Reads the next character, or `None` once both buffer and source are empty
    pub fn read(&mut self) -> Option<char> {
        self.pushback.pop().or_else(|| self.source.next())
    }

    /// Returns the next character without consuming it
    pub fn peek(&mut self) -> Option<char> {
        let c = self.read()?;
        self.pushback.push(c);
        Some(c)
    }

    /// Pushes a character back; it is the next one read
    pub fn unread(&mut self, c: char) {
        self.pushback.push(c);
    }

    /// Pushes a string back so that its first character is read next
    pub fn unread_str(&mut self, text: &str) {
        self.pushback.extend(text.chars().rev());
    }

    /// Number of characters waiting in the pushback buffer
    pub fn pushback_len(&self) -> usize {
        self.pushback.len()
    }
}

impl PushbackReader<std::vec::IntoIter<char>> {
    /// Reader over an in-memory string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        PushbackReader::new(text.chars().collect::<Vec<_>>().into_iter())
    }

    /// Reader over a UTF-8 byte stream, read fully up front
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(PushbackReader::from_str(&text))
    }
}

impl<I: Iterator<Item = char>> Iterator for PushbackReader<I> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        self.read()
    }
}
