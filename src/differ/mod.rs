mod chars;
mod common;
mod line;
mod myers;
mod segment;
mod word;

use crate::edit::DiffEdit;
use crate::source::SourceText;
use crate::window::DEFAULT_WINDOW_SIZE;
use crate::{Error, TextChange};
use std::fmt;
use std::str::FromStr;

pub use chars::CharDiffer;
pub use line::split_lines;
pub use segment::{SegmentDiffer, Segments};
pub use word::split_words;

pub use common::*;

/// A granularity strategy the Myers core runs against.
///
/// Implementors expose two sequences of atomic units and know how to map the
/// resulting edits back onto the old document.
pub trait TextDiffer {
    /// Number of units in the old sequence.
    fn old_len(&self) -> usize;

    /// Number of units in the new sequence.
    fn new_len(&self) -> usize;

    /// Whether old unit `old_index` equals new unit `new_index`.
    fn equal(&mut self, old_index: usize, new_index: usize) -> bool;

    /// Byte offset in the old document where `edit` applies.
    fn edit_position(&self, edit: &DiffEdit) -> usize;

    /// Append the replacement text contributed by `edit` to `out` and return
    /// the byte offset in the old document where the edit ends.
    fn append_edit(&self, edit: &DiffEdit, out: &mut String) -> usize;
}

/// The atomic unit two documents are compared by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiffKind {
    /// One line, including its terminator.
    #[default]
    Line,
    /// One char.
    Char,
    /// One word, whitespace run, line terminator or punctuation char.
    Word,
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiffKind::Line => "line",
            DiffKind::Char => "char",
            DiffKind::Word => "word",
        };
        f.write_str(name)
    }
}

impl FromStr for DiffKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "line" | "lines" => Ok(DiffKind::Line),
            "char" | "chars" | "character" => Ok(DiffKind::Char),
            "word" | "words" => Ok(DiffKind::Word),
            _ => Err(Error::UnknownDiffKind(s.to_string())),
        }
    }
}

/// The base Differ that orchestrates one diff between two snapshots.
#[derive(Debug, Clone)]
pub struct Differ<'a> {
    pub(crate) old: &'a str,
    pub(crate) new: &'a str,
    pub(crate) kind: DiffKind,
    pub(crate) window_size: usize,
    pub(crate) verify: bool,
}

impl<'a> Differ<'a> {
    /// Create a new Differ comparing lines, verifying results in debug builds.
    pub fn new(old: &'a str, new: &'a str) -> Self {
        Self {
            old,
            new,
            kind: DiffKind::default(),
            window_size: DEFAULT_WINDOW_SIZE,
            verify: cfg!(debug_assertions),
        }
    }

    /// Set the granularity.
    pub fn kind(mut self, kind: DiffKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the capacity, in chars, of each window used by char-mode diffing.
    pub fn window_size(mut self, chars: usize) -> Self {
        assert!(chars > 0, "window size must be at least one char");
        self.window_size = chars;
        self
    }

    /// Check that the produced changes turn the old text into the new one.
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Compute the minimal list of changes turning the old text into the new
    /// one. Changes are ordered, non-overlapping and in old-document byte
    /// offsets.
    pub fn get_minimal_changes(&self) -> Result<Vec<TextChange>, Error> {
        tracing::debug!(
            old_len = self.old.len(),
            new_len = self.new.len(),
            kind = %self.kind,
            "computing minimal changes"
        );

        if let Some(changes) = handle_degenerate(self.old, self.new) {
            tracing::debug!(changes = changes.len(), "degenerate input, skipping search");
            return Ok(changes);
        }

        let old = SourceText::new(self.old);
        let new = SourceText::new(self.new);
        let changes = match self.kind {
            DiffKind::Line => run(&mut SegmentDiffer::lines(&old, &new))?,
            DiffKind::Char => run(&mut CharDiffer::new(&old, &new, self.window_size))?,
            DiffKind::Word => run(&mut SegmentDiffer::words(&old, &new))?,
        };

        if self.verify {
            verify_round_trip(self.old, self.new, &changes)?;
        }
        Ok(changes)
    }
}

fn run<D: TextDiffer + ?Sized>(differ: &mut D) -> Result<Vec<TextChange>, Error> {
    let _span = tracing::trace_span!(
        "myers",
        old_units = differ.old_len(),
        new_units = differ.new_len()
    )
    .entered();

    let script = myers::diff(differ)?;
    let changes = consolidate_edits(differ, script.edits());
    tracing::debug!(
        edits = script.len(),
        changes = changes.len(),
        "minimal changes computed"
    );
    Ok(changes)
}
