//! Linear-space Myers shortest edit script.
//!
//! * time: `O((N+M)D)`
//! * space: `O(N+M)`
//!
//! The search runs forward from `(0, 0)` and backward from `(N, M)` at the
//! same time until the furthest reaching paths overlap. The overlap lies on
//! the "middle snake" of some shortest path, so the problem is split there and
//! each half is solved the same way. See E. W. Myers, "An O(ND) Difference
//! Algorithm and Its Variations", Algorithmica 1 (1986).

use super::TextDiffer;
use crate::edit::EditScript;
use crate::pool::{PooledBuffer, INDEX_POOL};
use crate::Error;
use std::ops::{Index, IndexMut, Range};

/// Furthest reaching x coordinate per diagonal `k = x - y`.
///
/// Diagonals may be negative, so the backing buffer is addressed with a fixed
/// offset. The vector is sized for the top-level problem and shared by every
/// recursive sub-problem, which only ever needs fewer diagonals.
struct V<'p> {
    offset: isize,
    v: PooledBuffer<'p, usize>,
}

impl V<'_> {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize,
            v: INDEX_POOL.rent(2 * max_d),
        }
    }
}

impl Index<isize> for V<'_> {
    type Output = usize;

    fn index(&self, k: isize) -> &usize {
        &self.v[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for V<'_> {
    fn index_mut(&mut self, k: isize) -> &mut usize {
        &mut self.v[(k + self.offset) as usize]
    }
}

fn max_d(old_len: usize, new_len: usize) -> usize {
    (old_len + new_len).div_ceil(2) + 1
}

/// Compute a minimal edit script turning the old sequence of `differ` into
/// the new one.
pub(crate) fn diff<D: TextDiffer + ?Sized>(differ: &mut D) -> Result<EditScript, Error> {
    let old_len = differ.old_len();
    let new_len = differ.new_len();
    let max_d = max_d(old_len, new_len);
    let mut vf = V::new(max_d);
    let mut vb = V::new(max_d);
    let mut script = EditScript::new();

    conquer(
        differ,
        0..old_len,
        0..new_len,
        &mut vf,
        &mut vb,
        &mut script,
    )?;

    Ok(script)
}

fn conquer<D: TextDiffer + ?Sized>(
    differ: &mut D,
    mut old: Range<usize>,
    mut new: Range<usize>,
    vf: &mut V<'_>,
    vb: &mut V<'_>,
    script: &mut EditScript,
) -> Result<(), Error> {
    // Shrink the box by skipping the common prefix and suffix
    while !old.is_empty() && !new.is_empty() && differ.equal(old.start, new.start) {
        old.start += 1;
        new.start += 1;
    }
    while !old.is_empty() && !new.is_empty() && differ.equal(old.end - 1, new.end - 1) {
        old.end -= 1;
        new.end -= 1;
    }

    if old.is_empty() {
        for new_index in new {
            script.add_insert(old.start, new_index);
        }
        return Ok(());
    }
    if new.is_empty() {
        for old_index in old {
            script.add_delete(old_index);
        }
        return Ok(());
    }

    let (x, y) = find_middle_snake(differ, old.clone(), new.clone(), vf, vb).ok_or(
        Error::MiddleSnakeNotFound {
            old_len: old.len(),
            new_len: new.len(),
        },
    )?;
    tracing::trace!(
        old_start = old.start,
        old_end = old.end,
        new_start = new.start,
        new_end = new.end,
        x,
        y,
        "split at middle snake"
    );

    conquer(differ, old.start..x, new.start..y, vf, vb, script)?;
    conquer(differ, x..old.end, y..new.end, vf, vb, script)
}

/// Find a point on the middle snake of a shortest path through
/// `old x new`, in absolute coordinates.
fn find_middle_snake<D: TextDiffer + ?Sized>(
    differ: &mut D,
    old: Range<usize>,
    new: Range<usize>,
    vf: &mut V<'_>,
    vb: &mut V<'_>,
) -> Option<(usize, usize)> {
    let n = old.len();
    let m = new.len();

    // The parity of the shortest edit script length follows the parity of delta
    let delta = n as isize - m as isize;
    let odd = delta & 1 == 1;

    // Virtual starting points at (0, -1) and (N, M + 1)
    vf[1] = 0;
    vb[1] = 0;

    let d_max = max_d(n, m) as isize;
    for d in 0..d_max {
        // Forward
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vf[k - 1] < vf[k + 1]) {
                vf[k + 1]
            } else {
                vf[k - 1] + 1
            };
            let mut y = (x as isize - k) as usize;
            let (x0, y0) = (x, y);

            while x < n && y < m && differ.equal(old.start + x, new.start + y) {
                x += 1;
                y += 1;
            }
            vf[k] = x;

            if odd && (k - delta).abs() < d && vf[k] + vb[-(k - delta)] >= n {
                return Some((old.start + x0, new.start + y0));
            }
        }

        // Reverse, with x and y counted from the end of each range
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vb[k - 1] < vb[k + 1]) {
                vb[k + 1]
            } else {
                vb[k - 1] + 1
            };
            let mut y = (x as isize - k) as usize;

            while x < n && y < m && differ.equal(old.start + n - x - 1, new.start + m - y - 1) {
                x += 1;
                y += 1;
            }
            vb[k] = x;

            if !odd && (k - delta).abs() <= d && vb[k] + vf[-(k - delta)] >= n {
                return Some((old.start + n - x, new.start + m - y));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::DiffEdit;

    /// Unit-per-element differ over two slices, for exercising the core alone.
    struct SliceDiffer<'a> {
        old: &'a [u8],
        new: &'a [u8],
    }

    impl TextDiffer for SliceDiffer<'_> {
        fn old_len(&self) -> usize {
            self.old.len()
        }

        fn new_len(&self) -> usize {
            self.new.len()
        }

        fn equal(&mut self, old_index: usize, new_index: usize) -> bool {
            self.old[old_index] == self.new[new_index]
        }

        fn edit_position(&self, edit: &DiffEdit) -> usize {
            edit.position
        }

        fn append_edit(&self, edit: &DiffEdit, _out: &mut String) -> usize {
            edit.position
        }
    }

    fn edits(old: &str, new: &str) -> Vec<DiffEdit> {
        let mut differ = SliceDiffer {
            old: old.as_bytes(),
            new: new.as_bytes(),
        };
        diff(&mut differ).unwrap().into_edits()
    }

    fn cost(edits: &[DiffEdit]) -> usize {
        edits.iter().map(|e| e.length).sum()
    }

    #[test]
    fn test_identical_sequences_have_no_edits() {
        assert!(edits("abcdef", "abcdef").is_empty());
        assert!(edits("", "").is_empty());
    }

    #[test]
    fn test_single_substitution() {
        assert_eq!(
            edits("abc", "adc"),
            vec![DiffEdit::insert(1, 1, 1), DiffEdit::delete(1, 1)]
        );
    }

    #[test]
    fn test_pure_insert_and_delete() {
        assert_eq!(edits("", "xyz"), vec![DiffEdit::insert(0, 0, 3)]);
        assert_eq!(edits("xyz", ""), vec![DiffEdit::delete(0, 3)]);
        assert_eq!(edits("ac", "abc"), vec![DiffEdit::insert(1, 1, 1)]);
        assert_eq!(edits("abc", "ac"), vec![DiffEdit::delete(1, 1)]);
    }

    #[test]
    fn test_classic_paper_example() {
        // ABCABBA -> CBABAC has an edit distance of 5
        let script = edits("ABCABBA", "CBABAC");
        assert_eq!(cost(&script), 5);
        assert_eq!(
            script,
            vec![
                DiffEdit::delete(0, 2),
                DiffEdit::delete(3, 1),
                DiffEdit::insert(5, 2, 1),
                DiffEdit::insert(7, 5, 1),
            ]
        );
    }

    #[test]
    fn test_completely_different() {
        assert_eq!(
            edits("aaaa", "bbb"),
            vec![DiffEdit::delete(0, 4), DiffEdit::insert(4, 0, 3)]
        );
    }

    #[test]
    fn test_edits_are_ascending() {
        let script = edits("the quick brown fox", "a quick red fox jumps");
        for pair in script.windows(2) {
            assert!(pair[0].position <= pair[1].position);
        }
    }
}
