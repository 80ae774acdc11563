use crate::Error;
use std::fmt;

/// A half-open byte range `[start, start + length)` in the old document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextSpan {
    pub start: usize,
    pub length: usize,
}

impl TextSpan {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    pub fn from_bounds(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span end {end} before start {start}");
        Self {
            start,
            length: end - start,
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start, self.end())
    }
}

/// Replace the old-document text covered by `span` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextChange {
    pub span: TextSpan,
    pub new_text: String,
}

impl TextChange {
    pub fn new(span: TextSpan, new_text: impl Into<String>) -> Self {
        Self {
            span,
            new_text: new_text.into(),
        }
    }

    pub fn is_insertion(&self) -> bool {
        self.span.is_empty() && !self.new_text.is_empty()
    }

    pub fn is_deletion(&self) -> bool {
        !self.span.is_empty() && self.new_text.is_empty()
    }
}

impl fmt::Display for TextChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {:?}", self.span, self.new_text)
    }
}

/// Apply ordered, non-overlapping changes to `old`, left to right.
pub fn apply_changes(old: &str, changes: &[TextChange]) -> Result<String, Error> {
    let inserted: usize = changes.iter().map(|c| c.new_text.len()).sum();
    let mut result = String::with_capacity(old.len() + inserted);
    let mut cursor = 0;

    for change in changes {
        let span = change.span;
        if span.end() > old.len() {
            return Err(Error::SpanOutOfRange {
                start: span.start,
                end: span.end(),
                len: old.len(),
            });
        }
        if span.start < cursor {
            return Err(Error::OverlappingChanges {
                start: span.start,
                previous_end: cursor,
            });
        }
        for offset in [span.start, span.end()] {
            if !old.is_char_boundary(offset) {
                return Err(Error::NotCharBoundary { offset });
            }
        }

        result.push_str(&old[cursor..span.start]);
        result.push_str(&change.new_text);
        cursor = span.end();
    }

    result.push_str(&old[cursor..]);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_single_replacement() {
        let changes = [TextChange::new(TextSpan::new(1, 1), "d")];
        assert_eq!(apply_changes("abc", &changes).unwrap(), "adc");
    }

    #[test]
    fn test_apply_insert_and_delete() {
        let changes = [
            TextChange::new(TextSpan::new(0, 0), ">> "),
            TextChange::new(TextSpan::new(5, 6), ""),
        ];
        assert!(changes[0].is_insertion());
        assert!(changes[1].is_deletion());
        assert_eq!(apply_changes("hello world", &changes).unwrap(), ">> hello");
    }

    #[test]
    fn test_apply_no_changes() {
        assert_eq!(apply_changes("same", &[]).unwrap(), "same");
    }

    #[test]
    fn test_apply_rejects_out_of_range() {
        let changes = [TextChange::new(TextSpan::new(2, 5), "")];
        assert!(matches!(
            apply_changes("abc", &changes),
            Err(Error::SpanOutOfRange { start: 2, end: 7, len: 3 })
        ));
    }

    #[test]
    fn test_apply_rejects_overlap() {
        let changes = [
            TextChange::new(TextSpan::new(0, 2), "x"),
            TextChange::new(TextSpan::new(1, 1), "y"),
        ];
        assert!(matches!(
            apply_changes("abc", &changes),
            Err(Error::OverlappingChanges { .. })
        ));
    }

    #[test]
    fn test_apply_rejects_split_char() {
        let changes = [TextChange::new(TextSpan::new(1, 1), "")];
        assert!(matches!(
            apply_changes("é", &changes),
            Err(Error::NotCharBoundary { offset: 1 })
        ));
    }

    #[test]
    fn test_display() {
        let change = TextChange::new(TextSpan::new(3, 2), "a\nb");
        assert_eq!(change.to_string(), "[3..5) -> \"a\\nb\"");
    }
}
