//! Pluggable strategies for choosing the next column to branch on.

use crate::dlx::matrix::Matrix;

/// A strategy that picks the next column for the search to branch on.
///
/// `pick` must return the handle of a header currently in the primary ring, or
/// the head sentinel to signal that no column is left to cover.
pub trait ColumnSelector<P> {
    fn pick(&mut self, mat: &Matrix<P>) -> usize;
}

/// The default selector: minimum remaining column size (Knuth's "S heuristic").
///
/// Ties are broken in favor of the column seen first in the current header
/// ring, which keeps the solution order deterministic.
#[derive(Default)]
pub struct MinSize;

impl<P> ColumnSelector<P> for MinSize {
    fn pick(&mut self, mat: &Matrix<P>) -> usize {
        let mut col = mat.right(mat.head());
        let mut size = mat.col_size(col);

        let mut j = col;
        while j != mat.head() {
            if mat.col_size(j) < size {
                col = j;
                size = mat.col_size(j);
            }
            j = mat.right(j);
        }
        col
    }
}
