//! Source locations
//!
//! Offsets count characters, not bytes, because the lexer walks the source
//! one `char` at a time. Line and column are 1-based and point at the first
//! character of the spanned region.

use serde::Serialize;

/// A region of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
    /// Line of `start` (1-indexed)
    pub line: u32,
    /// Column of `start` (1-indexed)
    pub column: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Placeholder span for values and nodes built outside the parser
    pub fn dummy() -> Self {
        Self::default()
    }

    pub fn is_dummy(&self) -> bool {
        self.line == 0
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both `self` and `other`.
    ///
    /// The location of the earlier span wins.
    pub fn merge(self, other: Span) -> Span {
        if other.is_dummy() {
            return self;
        }
        if self.is_dummy() {
            return other;
        }
        let first = if self.start <= other.start {
            self
        } else {
            other
        };
        Span {
            start: first.start,
            end: self.end.max(other.end),
            line: first.line,
            column: first.column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_earliest_location() {
        let a = Span::new(4, 6, 1, 5);
        let b = Span::new(10, 14, 2, 3);
        let merged = a.merge(b);
        assert_eq!(merged, Span::new(4, 14, 1, 5));
        assert_eq!(b.merge(a), merged);
    }

    #[test]
    fn test_merge_ignores_dummy() {
        let a = Span::new(0, 3, 1, 1);
        assert_eq!(a.merge(Span::dummy()), a);
        assert_eq!(Span::dummy().merge(a), a);
    }

    #[test]
    fn test_len() {
        assert_eq!(Span::new(2, 7, 1, 3).len(), 5);
        assert!(Span::dummy().is_empty());
    }
}
