use super::segment::SegmentDiffer;
use crate::source::SourceText;
use std::ops::Range;

impl<'a> SegmentDiffer<'a> {
    /// Compare documents one word at a time.
    ///
    /// Words sit between line and char granularity: small edits inside a long
    /// line stay small, while the search space is far smaller than char by
    /// char.
    pub fn words(old: &SourceText<'a>, new: &SourceText<'a>) -> Self {
        Self::split_with(old, new, split_words)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Word,
    Space,
    Newline,
    Other,
}

fn classify(ch: char) -> Class {
    match ch {
        '\n' | '\r' => Class::Newline,
        c if c.is_whitespace() => Class::Space,
        c if c.is_alphanumeric() || c == '_' => Class::Word,
        _ => Class::Other,
    }
}

/// Split `text` into words, whitespace runs, line terminators (`\n`, `\r\n`
/// or `\r`) and single other chars.
pub fn split_words(text: &str) -> Vec<Range<usize>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        let class = classify(ch);
        let mut end = start + ch.len_utf8();
        match class {
            Class::Word | Class::Space => {
                while let Some(&(offset, next)) = chars.peek() {
                    if classify(next) != class {
                        break;
                    }
                    end = offset + next.len_utf8();
                    chars.next();
                }
            }
            Class::Newline => {
                if ch == '\r' && chars.peek().map(|&(_, next)| next) == Some('\n') {
                    chars.next();
                    end += 1;
                }
            }
            Class::Other => {}
        }
        tokens.push(start..end);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differ::{consolidate_edits, myers};
    use crate::{TextChange, TextSpan};

    fn words(text: &str) -> Vec<&str> {
        split_words(text).into_iter().map(|r| &text[r]).collect()
    }

    fn changes(old: &str, new: &str) -> Vec<TextChange> {
        let old = SourceText::new(old);
        let new = SourceText::new(new);
        let mut differ = SegmentDiffer::words(&old, &new);
        let script = myers::diff(&mut differ).unwrap();
        consolidate_edits(&differ, script.edits())
    }

    #[test]
    fn test_split_words() {
        assert!(words("").is_empty());
        assert_eq!(
            words("let x_1 = foo(bar);"),
            vec!["let", " ", "x_1", " ", "=", " ", "foo", "(", "bar", ")", ";"]
        );
        assert_eq!(words("a  \tb\r\n\nc"), vec!["a", "  \t", "b", "\r\n", "\n", "c"]);
        assert_eq!(words("héllo wörld"), vec!["héllo", " ", "wörld"]);
        assert_eq!(words("!!"), vec!["!", "!"]);
    }

    #[test]
    fn test_replaced_word() {
        assert_eq!(
            changes("the quick brown fox", "the quick red fox"),
            vec![TextChange::new(TextSpan::new(10, 5), "red")]
        );
    }

    #[test]
    fn test_inserted_argument() {
        assert_eq!(
            changes("call(a, c)", "call(a, b, c)"),
            vec![TextChange::new(TextSpan::new(8, 0), "b, ")]
        );
    }
}
