use super::TextDiffer;
use crate::edit::{DiffEdit, EditKind};
use crate::source::SourceText;
use std::ops::Range;

/// A document cut into consecutive, non-empty byte ranges covering all of it.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    ranges: Vec<Range<usize>>,
    hashes: Vec<u64>,
}

impl<'a> Segments<'a> {
    /// Build the segment table from a splitting function returning the ranges.
    pub fn new(text: &'a str, split: impl FnOnce(&str) -> Vec<Range<usize>>) -> Self {
        let ranges = split(text);
        debug_assert!(
            ranges.iter().map(|r| r.len()).sum::<usize>() == text.len(),
            "segments must cover the whole text"
        );
        let hashes = ranges.iter().map(|r| hash_segment(&text[r.clone()])).collect();
        Self {
            text,
            ranges,
            hashes,
        }
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn get(&self, index: usize) -> &'a str {
        &self.text[self.ranges[index].clone()]
    }

    /// Byte offset where segment `index` starts; `len()` maps to the end.
    pub fn start_of(&self, index: usize) -> usize {
        self.ranges
            .get(index)
            .map_or(self.text.len(), |range| range.start)
    }

    /// Byte offset where segment `index - 1` ends.
    pub fn end_before(&self, index: usize) -> usize {
        if index == 0 {
            0
        } else {
            self.ranges[index - 1].end
        }
    }

    /// Text of segments `start..end`.
    pub fn text_of(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.start_of(start)..self.end_before(end)]
    }

    fn equal(&self, index: usize, other: &Segments<'_>, other_index: usize) -> bool {
        self.hashes[index] == other.hashes[other_index] && self.get(index) == other.get(other_index)
    }
}

/// FNV-1a over the segment's bytes; only used to reject unequal segments fast.
fn hash_segment(segment: &str) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in segment.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

/// Compares two documents unit by unit where a unit is a segment of text,
/// such as a line or a word.
#[derive(Debug, Clone)]
pub struct SegmentDiffer<'a> {
    old: Segments<'a>,
    new: Segments<'a>,
}

impl<'a> SegmentDiffer<'a> {
    pub fn new(old: Segments<'a>, new: Segments<'a>) -> Self {
        Self { old, new }
    }

    /// Split both documents with the same function.
    pub fn split_with(
        old: &SourceText<'a>,
        new: &SourceText<'a>,
        split: fn(&str) -> Vec<Range<usize>>,
    ) -> Self {
        Self::new(
            Segments::new(old.as_str(), split),
            Segments::new(new.as_str(), split),
        )
    }

    pub fn old_segments(&self) -> &Segments<'a> {
        &self.old
    }

    pub fn new_segments(&self) -> &Segments<'a> {
        &self.new
    }
}

impl TextDiffer for SegmentDiffer<'_> {
    fn old_len(&self) -> usize {
        self.old.len()
    }

    fn new_len(&self) -> usize {
        self.new.len()
    }

    fn equal(&mut self, old_index: usize, new_index: usize) -> bool {
        self.old.equal(old_index, &self.new, new_index)
    }

    fn edit_position(&self, edit: &DiffEdit) -> usize {
        self.old.start_of(edit.position)
    }

    fn append_edit(&self, edit: &DiffEdit, out: &mut String) -> usize {
        match edit.kind {
            EditKind::Insert => {
                out.push_str(
                    self.new
                        .text_of(edit.new_position, edit.new_position + edit.length),
                );
                self.old.start_of(edit.position)
            }
            EditKind::Delete => self.old.end_before(edit.position + edit.length),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_on_comma(text: &str) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut start = 0;
        for (offset, ch) in text.char_indices() {
            if ch == ',' {
                ranges.push(start..offset + 1);
                start = offset + 1;
            }
        }
        if start < text.len() {
            ranges.push(start..text.len());
        }
        ranges
    }

    #[test]
    fn test_segment_lookup() {
        let segments = Segments::new("a,bb,ccc", split_on_comma);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments.get(1), "bb,");
        assert_eq!(segments.start_of(2), 5);
        assert_eq!(segments.start_of(3), 8);
        assert_eq!(segments.end_before(0), 0);
        assert_eq!(segments.end_before(2), 5);
        assert_eq!(segments.text_of(1, 3), "bb,ccc");
        assert_eq!(segments.text_of(1, 1), "");
    }

    #[test]
    fn test_equality_uses_content() {
        let old = Segments::new("x,y,z", split_on_comma);
        let new = Segments::new("y,x,z", split_on_comma);
        let mut differ = SegmentDiffer::new(old, new);
        assert!(differ.equal(0, 1));
        assert!(differ.equal(1, 0));
        assert!(differ.equal(2, 2));
        assert!(!differ.equal(0, 0));
    }

    #[test]
    fn test_edit_mapping() {
        let old = Segments::new("a,b,c", split_on_comma);
        let new = Segments::new("a,X,Y,c", split_on_comma);
        let differ = SegmentDiffer::new(old, new);

        let mut out = String::new();
        let insert = DiffEdit::insert(1, 1, 2);
        assert_eq!(differ.edit_position(&insert), 2);
        assert_eq!(differ.append_edit(&insert, &mut out), 2);
        assert_eq!(out, "X,Y,");

        let delete = DiffEdit::delete(1, 1);
        assert_eq!(differ.edit_position(&delete), 2);
        assert_eq!(differ.append_edit(&delete, &mut out), 4);
        assert_eq!(out, "X,Y,");
    }
}
