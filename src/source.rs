use std::ops::Range;

/// Number of chars between two entries of the checkpoint table.
const CHECKPOINT_INTERVAL: usize = 256;

/// An immutable snapshot of a document that can be addressed by char index.
///
/// Text is stored as UTF-8, so mapping a char index to a byte offset is not
/// free. For pure ASCII documents both coordinate spaces coincide; otherwise a
/// table holding the byte offset of every `CHECKPOINT_INTERVAL`-th char keeps
/// the lookup bounded regardless of document size.
#[derive(Debug, Clone)]
pub struct SourceText<'a> {
    text: &'a str,
    char_len: usize,
    checkpoints: Option<Vec<usize>>,
}

impl<'a> SourceText<'a> {
    pub fn new(text: &'a str) -> Self {
        if text.is_ascii() {
            return Self {
                text,
                char_len: text.len(),
                checkpoints: None,
            };
        }

        let mut checkpoints = Vec::with_capacity(text.len() / CHECKPOINT_INTERVAL + 1);
        let mut char_len = 0;
        for (offset, _) in text.char_indices() {
            if char_len % CHECKPOINT_INTERVAL == 0 {
                checkpoints.push(offset);
            }
            char_len += 1;
        }

        Self {
            text,
            char_len,
            checkpoints: Some(checkpoints),
        }
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Length in UTF-8 bytes.
    pub fn byte_len(&self) -> usize {
        self.text.len()
    }

    /// Byte offset of the char at `char_index`. `char_index == len()` maps to
    /// the end of the text.
    pub fn byte_offset(&self, char_index: usize) -> usize {
        assert!(
            char_index <= self.char_len,
            "char index {char_index} out of range for text of {} chars",
            self.char_len
        );

        let Some(checkpoints) = &self.checkpoints else {
            return char_index;
        };
        if char_index == self.char_len {
            return self.text.len();
        }

        let base = checkpoints[char_index / CHECKPOINT_INTERVAL];
        let skip = char_index % CHECKPOINT_INTERVAL;
        self.text[base..]
            .char_indices()
            .nth(skip)
            .map(|(offset, _)| base + offset)
            .unwrap_or(self.text.len())
    }

    /// Copy `dest.len()` chars starting at char `start` into `dest`.
    pub fn copy_chars(&self, start: usize, dest: &mut [char]) {
        assert!(
            start + dest.len() <= self.char_len,
            "cannot copy {} chars at {start} from text of {} chars",
            dest.len(),
            self.char_len
        );

        let from = self.byte_offset(start);
        for (slot, ch) in dest.iter_mut().zip(self.text[from..].chars()) {
            *slot = ch;
        }
    }

    pub fn slice(&self, range: Range<usize>) -> &'a str {
        &self.text[range]
    }

    /// Slice addressed in chars rather than bytes.
    pub fn char_slice(&self, range: Range<usize>) -> &'a str {
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end);
        &self.text[start..end]
    }
}

impl<'a> From<&'a str> for SourceText<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}
