use super::segment::SegmentDiffer;
use crate::source::SourceText;
use std::ops::Range;

impl<'a> SegmentDiffer<'a> {
    /// Compare documents one line at a time.
    ///
    /// A line includes its terminator, so a change of line ending alone shows
    /// up as a changed line.
    pub fn lines(old: &SourceText<'a>, new: &SourceText<'a>) -> Self {
        Self::split_with(old, new, split_lines)
    }
}

/// Split `text` into lines terminated by `\n`, `\r\n` or `\r`. A trailing
/// unterminated line counts as a line; an empty text has no lines.
pub fn split_lines(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(start..i + 1);
                start = i + 1;
            }
            b'\r' => {
                let end = if bytes.get(i + 1) == Some(&b'\n') {
                    i + 2
                } else {
                    i + 1
                };
                lines.push(start..end);
                start = end;
                i = end - 1;
            }
            _ => {}
        }
        i += 1;
    }

    if start < bytes.len() {
        lines.push(start..bytes.len());
    }
    lines
}
