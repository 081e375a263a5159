/// Set of characters stored as inclusive ranges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharSet {
    ranges: Vec<(char, char)>,
}

impl CharSet {
    /// Creates an empty set
    pub fn new() -> Self {
        CharSet::default()
    }

    /// All codes up to and including the space character
    pub fn whitespace() -> Self {
        CharSet::new().with_range('\0', ' ')
    }

    /// Letters, digits, `-`, `_`, and the Latin-1 and wider Unicode letters
    pub fn word() -> Self {
        CharSet::new()
            .with_range('a', 'z')
            .with_range('A', 'Z')
            .with_range('0', '9')
            .with_char('-')
            .with_char('_')
            .with_range('\u{C0}', '\u{FF}')
            .with_range('\u{100}', '\u{FFFD}')
    }

    /// Adds an inclusive range, ignoring reversed bounds
    pub fn add_range(&mut self, start: char, end: char) {
        if start <= end {
            self.ranges.push((start, end));
        }
    }

    /// Adds a single character
    pub fn add_char(&mut self, c: char) {
        self.add_range(c, c);
    }

    /// Builder form of [`add_range`](CharSet::add_range)
    pub fn with_range(mut self, start: char, end: char) -> Self {
        self.add_range(start, end);
        self
    }

    /// Builder form of [`add_char`](CharSet::add_char)
    pub fn with_char(mut self, c: char) -> Self {
        self.add_char(c);
        self
    }

    /// Returns true if any range covers `c`
    pub fn contains(&self, c: char) -> bool {
        self.ranges
            .iter()
            .any(|&(start, end)| start <= c && c <= end)
    }

    /// Returns true if no range was added
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sets() {
        let ws = CharSet::whitespace();
        assert!(ws.contains(' '));
        assert!(ws.contains('\t'));
        assert!(ws.contains('\u{0}'));
        assert!(!ws.contains('a'));

        let word = CharSet::word();
        for c in ['a', 'Z', '7', '-', '_', 'é', 'ж', '中'] {
            assert!(word.contains(c), "{c:?} should be a word char");
        }
        for c in [' ', '+', '.', '"', '/'] {
            assert!(!word.contains(c), "{c:?} should not be a word char");
        }
    }

    #[test]
    fn test_reversed_range_ignored() {
        let set = CharSet::new().with_range('z', 'a');
        assert!(set.is_empty());
        assert!(!set.contains('m'));
    }
}
