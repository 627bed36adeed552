// src/diff.rs
//! Structural diff between two program units.
//!
//! The diff size is the edit distance between the preorder structural token
//! sequences of the two units: the number of node insertions, deletions, and
//! relabelings needed to turn one outline into the other. It is a cheap
//! stand-in for a full tree edit script and behaves the same way for ranking:
//! 0 for structurally identical units, growing with divergence.

use crate::frontend::UnitForm;
use crate::similarity::seq_edit_distance;

/// Size of the edit script between two unit forms.
#[must_use]
pub fn structural_diff_size(a: &UnitForm, b: &UnitForm) -> usize {
    seq_edit_distance(&a.outline, &b.outline)
}
