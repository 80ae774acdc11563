use super::TextDiffer;
use crate::edit::DiffEdit;
use crate::{apply_changes, Error, TextChange, TextSpan};

/// Handle the cases that need no search: equal documents, and documents
/// where one side is empty.
pub fn handle_degenerate(old: &str, new: &str) -> Option<Vec<TextChange>> {
    if old == new {
        return Some(Vec::new());
    }
    if old.is_empty() {
        return Some(vec![TextChange::new(TextSpan::new(0, 0), new)]);
    }
    if new.is_empty() {
        return Some(vec![TextChange::new(TextSpan::new(0, old.len()), "")]);
    }
    None
}

/// Collapse an ascending edit list into non-overlapping text changes in old
/// document coordinates. Edits touching each other merge into one change.
pub fn consolidate_edits<D: TextDiffer + ?Sized>(
    differ: &D,
    edits: &[DiffEdit],
) -> Vec<TextChange> {
    let mut changes = Vec::new();
    let mut text = String::new();
    let mut start = 0;
    let mut end = 0;

    for edit in edits {
        let position = differ.edit_position(edit);
        if position != end {
            assert!(position > end, "edits must be ascending");
            if end > start || !text.is_empty() {
                changes.push(TextChange::new(
                    TextSpan::from_bounds(start, end),
                    std::mem::take(&mut text),
                ));
            }
            start = position;
        }
        end = differ.append_edit(edit, &mut text);
    }

    if end > start || !text.is_empty() {
        changes.push(TextChange::new(TextSpan::from_bounds(start, end), text));
    }
    changes
}

/// Check that applying `changes` to `old` reproduces `new` exactly.
pub fn verify_round_trip(old: &str, new: &str, changes: &[TextChange]) -> Result<(), Error> {
    let actual = apply_changes(old, changes)?;
    if actual == new {
        return Ok(());
    }

    let first_difference = actual
        .bytes()
        .zip(new.bytes())
        .position(|(a, b)| a != b)
        .unwrap_or(actual.len().min(new.len()));
    tracing::error!(
        expected_len = new.len(),
        actual_len = actual.len(),
        first_difference,
        "minimal changes failed to reproduce the new text"
    );
    Err(Error::RoundTripMismatch {
        expected_len: new.len(),
        actual_len: actual.len(),
        first_difference,
    })
}
