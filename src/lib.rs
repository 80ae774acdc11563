//! Minimal text changes between two snapshots of a document.
//!
//! The engine is a linear-space Myers diff run at line, word or char
//! granularity. Its output is a list of ordered, non-overlapping
//! [`TextChange`]s in old-document byte offsets which, applied left to right,
//! turn the old text into the new one.
//!
//! ```
//! use textdiffer::{apply_changes, get_minimal_changes, DiffKind, TextSpan};
//!
//! let changes = get_minimal_changes("abc", "adc", DiffKind::Char).unwrap();
//! assert_eq!(changes.len(), 1);
//! assert_eq!(changes[0].span, TextSpan::new(1, 1));
//! assert_eq!(apply_changes("abc", &changes).unwrap(), "adc");
//! ```

use thiserror::Error;

mod change;
pub mod differ;
mod edit;
mod pool;
mod source;
mod window;

pub use change::{apply_changes, TextChange, TextSpan};
pub use differ::{DiffKind, Differ, TextDiffer};
pub use edit::{DiffEdit, EditKind, EditScript};
pub use pool::{BufferPool, PooledBuffer};
pub use source::SourceText;
pub use window::{WindowedBuffer, DEFAULT_WINDOW_SIZE};

#[derive(Debug, Error)]
pub enum Error {
    #[error("middle snake search exhausted without overlap ({old_len} old units, {new_len} new units)")]
    MiddleSnakeNotFound { old_len: usize, new_len: usize },

    #[error("changes do not reproduce the new text: expected {expected_len} bytes, got {actual_len}, first difference at byte {first_difference}")]
    RoundTripMismatch {
        expected_len: usize,
        actual_len: usize,
        first_difference: usize,
    },

    #[error("span [{start}..{end}) out of range for text of {len} bytes")]
    SpanOutOfRange { start: usize, end: usize, len: usize },

    #[error("change at {start} overlaps previous change ending at {previous_end}")]
    OverlappingChanges { start: usize, previous_end: usize },

    #[error("offset {offset} is not on a char boundary")]
    NotCharBoundary { offset: usize },

    #[error("unknown diff kind: {0}")]
    UnknownDiffKind(String),
}

/// Compute the minimal changes between `old` and `new` with default settings.
pub fn get_minimal_changes(old: &str, new: &str, kind: DiffKind) -> Result<Vec<TextChange>, Error> {
    Differ::new(old, new).kind(kind).get_minimal_changes()
}
