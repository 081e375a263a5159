/// Character source with unlimited unread and exact line/column tracking
///
/// The cursor starts before the first character (position `-1`). Every
/// [`read`](Scanner::read), including reads past the end, is undone by exactly
/// one [`unread`](Scanner::unread), and the line/column after an unread always
/// equal the values before the matching read.
#[derive(Debug, Clone)]
pub struct Scanner {
    /// Source text as character vector
    buffer: Vec<char>,
    /// Index of the last character read, `-1` before the first read
    position: isize,
    /// Reads performed while already at the end
    overrun: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Characters read on the current line
    column: usize,
}

impl Scanner {
    /// Creates a scanner positioned before the first character of `text`
    pub fn new(text: &str) -> Self {
        Scanner {
            buffer: text.chars().collect(),
            position: -1,
            overrun: 0,
            line: 1,
            column: 0,
        }
    }

    /// Reads the next character, or `None` past the end
    pub fn read(&mut self) -> Option<char> {
        let next = self.position + 1;
        let len = self.len() as isize;

        if next < len {
            self.position = next;
            self.advance_line_column(next as usize);
            Some(self.buffer[next as usize])
        } else if next == len {
            self.position = len;
            None
        } else {
            self.overrun += 1;
            None
        }
    }

    /// Returns the next character without consuming it
    pub fn peek(&self) -> Option<char> {
        self.buffer.get((self.position + 1) as usize).copied()
    }

    /// Line the scanner will be on after reading the next character
    pub fn peek_line(&self) -> usize {
        match self.next_index() {
            Some(i) if self.is_line_break(i) => self.line + 1,
            _ => self.line,
        }
    }

    /// Column the scanner will be at after reading the next character
    pub fn peek_column(&self) -> usize {
        match self.next_index() {
            Some(i) if self.is_line_break(i) => 0,
            Some(_) => self.column + 1,
            None => self.column,
        }
    }

    /// Steps back over the last character read
    pub fn unread(&mut self) {
        if self.overrun > 0 {
            self.overrun -= 1;
            return;
        }

        let len = self.len() as isize;
        if self.position < 0 {
            return;
        }
        if self.position == len {
            // The end-of-input read did not move line or column
            self.position = len - 1;
            return;
        }

        let unread_index = self.position as usize;
        self.position -= 1;

        if self.is_line_break(unread_index) {
            // Previous line length is unknown locally, replay from the start
            self.recompute_line_column();
        } else {
            self.column = self.column.saturating_sub(1);
        }
    }

    /// Steps back over the last `count` characters read
    pub fn unread_many(&mut self, count: usize) {
        for _ in 0..count {
            self.unread();
        }
    }

    /// Rewinds to the start of the text
    pub fn reset(&mut self) {
        self.position = -1;
        self.overrun = 0;
        self.line = 1;
        self.column = 0;
    }

    /// Current line number (1-indexed)
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current column, `0` right after a line break
    pub fn column(&self) -> usize {
        self.column
    }

    /// Index of the last character read, `-1` before the first read and
    /// `len()` once the end has been read
    pub fn position(&self) -> isize {
        self.position
    }

    /// Number of characters in the text
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true for an empty text
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns true when no character is left to read
    pub fn is_at_end(&self) -> bool {
        self.peek().is_none()
    }

    fn next_index(&self) -> Option<usize> {
        let next = (self.position + 1) as usize;
        (next < self.buffer.len()).then_some(next)
    }

    /// LF, or a CR that is not half of a CR/LF or LF/CR pair
    fn is_line_break(&self, index: usize) -> bool {
        match self.buffer[index] {
            '\n' => true,
            '\r' => {
                let after_lf = index > 0 && self.buffer[index - 1] == '\n';
                let before_lf = self.buffer.get(index + 1) == Some(&'\n');
                !after_lf && !before_lf
            }
            _ => false,
        }
    }

    fn advance_line_column(&mut self, index: usize) {
        if self.is_line_break(index) {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    fn recompute_line_column(&mut self) {
        self.line = 1;
        self.column = 0;
        if self.position < 0 {
            return;
        }
        for index in 0..=self.position as usize {
            self.advance_line_column(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(scanner: &Scanner) -> (isize, usize, usize) {
        (scanner.position(), scanner.line(), scanner.column())
    }

    #[test]
    fn test_read_tracks_columns() {
        let mut scanner = Scanner::new("ab");
        assert_eq!(state(&scanner), (-1, 1, 0));
        assert_eq!(scanner.read(), Some('a'));
        assert_eq!(state(&scanner), (0, 1, 1));
        assert_eq!(scanner.read(), Some('b'));
        assert_eq!(state(&scanner), (1, 1, 2));
        assert_eq!(scanner.read(), None);
        assert_eq!(scanner.read(), None);
        assert_eq!(state(&scanner), (2, 1, 2));
    }

    #[test]
    fn test_crlf_counts_once() {
        let mut scanner = Scanner::new("a\r\nb");
        scanner.read();
        scanner.read(); // \r
        assert_eq!(scanner.line(), 1);
        scanner.read(); // \n
        assert_eq!((scanner.line(), scanner.column()), (2, 0));
        scanner.read();
        assert_eq!((scanner.line(), scanner.column()), (2, 1));
    }

    #[test]
    fn test_lfcr_and_lone_cr() {
        let mut scanner = Scanner::new("\n\rx\ry");
        scanner.read(); // \n
        assert_eq!(scanner.line(), 2);
        scanner.read(); // \r after \n
        assert_eq!(scanner.line(), 2);
        scanner.read(); // x
        scanner.read(); // lone \r
        assert_eq!((scanner.line(), scanner.column()), (3, 0));
    }

    #[test]
    fn test_unread_across_line_break() {
        let mut scanner = Scanner::new("abc\r\nde\nf");
        let mut states = vec![state(&scanner)];
        while scanner.read().is_some() {
            states.push(state(&scanner));
        }
        // Step back over the end-of-input read first
        scanner.unread();
        for expected in states.iter().rev().skip(1) {
            scanner.unread();
            assert_eq!(state(&scanner), *expected);
        }
    }

    #[test]
    fn test_unread_past_end_and_start() {
        let mut scanner = Scanner::new("x");
        scanner.read();
        scanner.read();
        scanner.read();
        scanner.unread_many(2);
        assert_eq!(state(&scanner), (0, 1, 1));
        assert_eq!(scanner.peek(), None);
        scanner.unread_many(5);
        assert_eq!(state(&scanner), (-1, 1, 0));
        assert_eq!(scanner.read(), Some('x'));
    }

    #[test]
    fn test_peek_position() {
        let mut scanner = Scanner::new("a\nb");
        assert_eq!((scanner.peek_line(), scanner.peek_column()), (1, 1));
        scanner.read();
        assert_eq!(scanner.peek(), Some('\n'));
        assert_eq!((scanner.peek_line(), scanner.peek_column()), (2, 0));
        assert_eq!(scanner.position(), 0);
        scanner.read();
        scanner.read();
        assert!(scanner.is_at_end());
        assert_eq!((scanner.peek_line(), scanner.peek_column()), (2, 1));
    }

    #[test]
    fn test_reset() {
        let mut scanner = Scanner::new("a\nb");
        while scanner.read().is_some() {}
        scanner.reset();
        assert_eq!(state(&scanner), (-1, 1, 0));
        assert_eq!(scanner.read(), Some('a'));
    }

    #[test]
    fn test_empty_text() {
        let mut scanner = Scanner::new("");
        assert!(scanner.is_empty());
        assert_eq!(scanner.read(), None);
        scanner.unread();
        assert_eq!(state(&scanner), (-1, 1, 0));
    }
}
