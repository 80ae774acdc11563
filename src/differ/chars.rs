use super::TextDiffer;
use crate::edit::{DiffEdit, EditKind};
use crate::pool::CHAR_POOL;
use crate::source::SourceText;
use crate::window::WindowedBuffer;

/// Compares documents one char at a time.
///
/// Neither document is materialised as chars. Each side is read through its
/// own [`WindowedBuffer`], rented from the shared pool for the lifetime of the
/// differ and returned when it is dropped.
pub struct CharDiffer<'a, 's> {
    old: &'s SourceText<'a>,
    new: &'s SourceText<'a>,
    old_window: WindowedBuffer<'static>,
    new_window: WindowedBuffer<'static>,
}

impl<'a, 's> CharDiffer<'a, 's> {
    pub fn new(old: &'s SourceText<'a>, new: &'s SourceText<'a>, window_size: usize) -> Self {
        Self {
            old,
            new,
            old_window: WindowedBuffer::new(&CHAR_POOL, window_size.min(old.len().max(1))),
            new_window: WindowedBuffer::new(&CHAR_POOL, window_size.min(new.len().max(1))),
        }
    }
}

impl TextDiffer for CharDiffer<'_, '_> {
    fn old_len(&self) -> usize {
        self.old.len()
    }

    fn new_len(&self) -> usize {
        self.new.len()
    }

    fn equal(&mut self, old_index: usize, new_index: usize) -> bool {
        self.old_window.get_or_fill(self.old, old_index)
            == self.new_window.get_or_fill(self.new, new_index)
    }

    fn edit_position(&self, edit: &DiffEdit) -> usize {
        self.old.byte_offset(edit.position)
    }

    fn append_edit(&self, edit: &DiffEdit, out: &mut String) -> usize {
        match edit.kind {
            EditKind::Insert => {
                let range = edit.new_position..edit.new_position + edit.length;
                out.push_str(self.new.char_slice(range));
                self.old.byte_offset(edit.position)
            }
            EditKind::Delete => self.old.byte_offset(edit.position + edit.length),
        }
    }
}
