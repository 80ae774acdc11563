/// Kind of a primitive edit produced by the Myers core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Insert,
    Delete,
}

/// A run of atomic units (lines, chars or words) inserted or deleted.
///
/// `position` is an index into the old sequence. For inserts,
/// `new_position` is where the inserted units are taken from in the new
/// sequence; for deletes it is unused and kept at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffEdit {
    pub kind: EditKind,
    pub position: usize,
    pub new_position: usize,
    pub length: usize,
}

impl DiffEdit {
    pub fn insert(position: usize, new_position: usize, length: usize) -> Self {
        Self {
            kind: EditKind::Insert,
            position,
            new_position,
            length,
        }
    }

    pub fn delete(position: usize, length: usize) -> Self {
        Self {
            kind: EditKind::Delete,
            position,
            new_position: 0,
            length,
        }
    }
}

/// Accumulates single-unit edits in ascending position order, coalescing
/// adjacent edits of the same kind into runs.
#[derive(Debug, Default)]
pub struct EditScript {
    edits: Vec<DiffEdit>,
}

impl EditScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_delete(&mut self, position: usize) {
        if let Some(last) = self.edits.last_mut() {
            if last.kind == EditKind::Delete && last.position + last.length == position {
                last.length += 1;
                return;
            }
        }
        self.check_order(position);
        self.edits.push(DiffEdit::delete(position, 1));
    }

    pub fn add_insert(&mut self, position: usize, new_position: usize) {
        if let Some(last) = self.edits.last_mut() {
            if last.kind == EditKind::Insert
                && last.position == position
                && last.new_position + last.length == new_position
            {
                last.length += 1;
                return;
            }
        }
        self.check_order(position);
        self.edits.push(DiffEdit::insert(position, new_position, 1));
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn edits(&self) -> &[DiffEdit] {
        &self.edits
    }

    pub fn into_edits(self) -> Vec<DiffEdit> {
        self.edits
    }

    fn check_order(&self, position: usize) {
        debug_assert!(
            self.edits.last().map_or(true, |last| match last.kind {
                EditKind::Delete => last.position + last.length <= position,
                EditKind::Insert => last.position <= position,
            }),
            "edit at {position} added out of order"
        );
    }
}
