//! The sparse toroidal matrix at the heart of the dancing links (DLX) algorithm.

use std::error::Error;
use std::fmt::Display;

/// Identifies a row appended to a [`Matrix`], in append order starting from 0.
pub type RowId = usize;

/// Whether a column must be covered exactly once (`Primary`)
/// or at most once (`Secondary`) in a solution.
#[derive(PartialEq, Eq, Clone, Copy)]
#[cfg_attr(test, derive(Debug))]
pub enum ColumnKind {
    Primary,
    Secondary,
}

/// A single node of [`Matrix`].
#[derive(Default)]
#[cfg_attr(test, derive(Debug, Clone, PartialEq, Eq))]
struct Node {
    // row, col: 1-based b/c of head node (only internally)
    row: usize,
    col: usize,
    left: usize,
    right: usize,
    up: usize,
    down: usize,
}

/// An error returned when an appended row does not fit the matrix columns.
#[derive(Debug, PartialEq, Eq)]
pub enum MatrixError {
    /// A row references a column index outside the construction order.
    ColumnOutOfRange { col: usize, col_count: usize },
    /// A row references the same column twice.
    DuplicateColumn { col: usize },
}

impl Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::ColumnOutOfRange { col, col_count } => {
                write!(f, "column index {} out of range (matrix has {} columns)", col, col_count)
            }
            MatrixError::DuplicateColumn { col } => {
                write!(f, "column index {} appears twice in one row", col)
            }
        }
    }
}

impl Error for MatrixError {}

/// A sparse matrix representation of an exact cover problem used for the DLX algorithm.
///
/// Nodes live in an arena indexed by `usize` handles; every link is plain index
/// arithmetic, so covering and uncovering never touch ownership. Each appended
/// row carries a caller-supplied payload of type `P`, retrievable by [`RowId`].
pub struct Matrix<P> {
    col_cnt: usize,
    pool: Vec<Node>, // head: 0, column headers: 1..=col_cnt
    col_size: Vec<usize>,
    col_kind: Vec<ColumnKind>,
    payloads: Vec<P>,
}

// Methods for initializing Matrix
impl<P> Matrix<P> {
    pub(crate) const HEAD: usize = 0;

    /// Creates a matrix from an ordered list of column descriptors.
    ///
    /// Primary columns are spliced into the header ring; secondary columns get
    /// a header too, but stay self-linked horizontally so the column selector
    /// never proposes them.
    pub fn new(columns: Vec<ColumnKind>) -> Matrix<P> {
        let col_cnt = columns.len();
        let mut mat = Matrix {
            col_cnt,
            pool: vec![Node::default()],
            col_size: vec![0; col_cnt + 1],
            col_kind: columns,
            payloads: vec![],
        };

        let mut ring_tail = Matrix::<P>::HEAD;
        for col_num in 1..=col_cnt {
            let col = mat.create_node(0, col_num);
            if mat.col_kind[col_num - 1] == ColumnKind::Primary {
                mat.insert_right(ring_tail, col);
                ring_tail = col;
            }
        }
        mat
    }

    /// Appends one row given as indices into the construction-order columns and
    /// returns its identity. An empty row gets an identity but no nodes.
    pub fn append_row(&mut self, cols: &[usize], payload: P) -> Result<RowId, MatrixError> {
        for (i, &col) in cols.iter().enumerate() {
            if col >= self.col_cnt {
                return Err(MatrixError::ColumnOutOfRange { col, col_count: self.col_cnt });
            }
            if cols[..i].contains(&col) {
                return Err(MatrixError::DuplicateColumn { col });
            }
        }

        let row_id = self.payloads.len();
        let row_num = row_id + 1;
        let mut left_node = 0;

        for &col in cols {
            let col_num = col + 1;
            let node = self.create_node(row_num, col_num);

            self.insert_down(self.pool[col_num].up, node);
            if left_node != 0 {
                self.insert_right(left_node, node);
            }

            self.col_size[col_num] += 1;
            left_node = node;
        }

        self.payloads.push(payload);
        Ok(row_id)
    }

    /// Appends a batch of rows with their payloads, validating every row before
    /// touching the links, and returns the new identities in order.
    pub fn append_rows(
        &mut self,
        rows: &[Vec<usize>],
        payloads: Vec<P>,
    ) -> Result<Vec<RowId>, MatrixError> {
        assert_eq!(rows.len(), payloads.len());
        for row in rows {
            for (i, &col) in row.iter().enumerate() {
                if col >= self.col_cnt {
                    return Err(MatrixError::ColumnOutOfRange { col, col_count: self.col_cnt });
                }
                if row[..i].contains(&col) {
                    return Err(MatrixError::DuplicateColumn { col });
                }
            }
        }

        let mut ids = Vec::with_capacity(rows.len());
        for (row, payload) in rows.iter().zip(payloads) {
            // Already validated, so the per-row check cannot fail.
            ids.push(self.append_row(row, payload)?);
        }
        Ok(ids)
    }

    /// Returns the number of columns given at construction.
    pub fn col_count(&self) -> usize { self.col_cnt }

    /// Returns the number of rows appended so far.
    pub fn row_count(&self) -> usize { self.payloads.len() }

    /// Returns the payload attached to a row.
    pub fn payload(&self, row: RowId) -> &P { &self.payloads[row] }
}

// Link accessors used by the search and the column selector. Handles are raw
// arena indices; the head sentinel anchors the primary header ring.
impl<P> Matrix<P> {
    /// Returns the handle of the head sentinel.
    #[inline]
    pub fn head(&self) -> usize { Matrix::<P>::HEAD }

    /// Returns the handle right of `node` in its horizontal ring.
    #[inline]
    pub fn right(&self, node: usize) -> usize { self.pool[node].right }

    /// Returns the handle left of `node` in its horizontal ring.
    #[inline]
    pub fn left(&self, node: usize) -> usize { self.pool[node].left }

    /// Returns the handle below `node` in its vertical ring.
    #[inline]
    pub fn down(&self, node: usize) -> usize { self.pool[node].down }

    /// Returns the handle above `node` in its vertical ring.
    #[inline]
    pub fn up(&self, node: usize) -> usize { self.pool[node].up }

    /// Returns the number of live nodes in the column under header `col`.
    #[inline]
    pub fn col_size(&self, col: usize) -> usize { self.col_size[col] }

    /// Returns the header handle of the column containing `node`.
    #[inline]
    pub(crate) fn col_of(&self, node: usize) -> usize { self.pool[node].col }

    /// Returns the identity of the row containing `node`.
    #[inline]
    pub(crate) fn row_of(&self, node: usize) -> RowId {
        debug_assert!(self.pool[node].row > 0);
        self.pool[node].row - 1
    }
}

// The canonical cover/uncover pair. `uncover_col` undoes `cover_col` link for
// link, in exact reverse order, which is what makes backtracking cheap.
impl<P> Matrix<P> {
    /// Unlinks column `col` from the header ring and hides every row that
    /// intersects it. Returns the number of link updates for statistics.
    pub(crate) fn cover_col(&mut self, col: usize) -> u64 {
        let Node { left, right, .. } = self.pool[col];
        self.pool[left].right = right;
        self.pool[right].left = left;
        let mut updates = 1;

        let mut i = self.pool[col].down;
        while i != col {
            let mut j = self.pool[i].right;
            while j != i {
                let Node { col: c, up, down, .. } = self.pool[j];
                self.pool[up].down = down;
                self.pool[down].up = up;

                self.col_size[c] -= 1;
                updates += 1;
                j = self.pool[j].right;
            }

            i = self.pool[i].down;
        }
        updates
    }

    /// Restores column `col` and every row hidden by the matching
    /// [`cover_col`](Matrix::cover_col), bottom-to-top and right-to-left.
    pub(crate) fn uncover_col(&mut self, col: usize) {
        let mut i = self.pool[col].up;
        while i != col {
            let mut j = self.pool[i].left;
            while j != i {
                let Node { col: c, up, down, .. } = self.pool[j];
                self.pool[up].down = j;
                self.pool[down].up = j;

                self.col_size[c] += 1;
                j = self.pool[j].left;
            }

            i = self.pool[i].up;
        }

        let Node { left, right, .. } = self.pool[col];
        self.pool[left].right = col;
        self.pool[right].left = col;
    }
}

// Helper methods
impl<P> Matrix<P> {
    fn create_node(&mut self, row: usize, col: usize) -> usize {
        let idx = self.pool.len();
        self.pool.push(Node {
            row,
            col,
            left: idx,
            right: idx,
            up: idx,
            down: idx,
        });
        idx
    }

    fn insert_right(&mut self, at: usize, node: usize) {
        let right = self.pool[at].right;
        self.pool[node].right = right;
        self.pool[right].left = node;
        self.pool[node].left = at;
        self.pool[at].right = node;
    }

    fn insert_down(&mut self, at: usize, node: usize) {
        let down = self.pool[at].down;
        self.pool[node].down = down;
        self.pool[down].up = node;
        self.pool[node].up = at;
        self.pool[at].down = node;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn primary(n: usize) -> Vec<ColumnKind> {
        vec![ColumnKind::Primary; n]
    }

    fn append_all(mat: &mut Matrix<usize>, rows: &[Vec<usize>]) -> Vec<RowId> {
        let payloads = (0..rows.len()).collect();
        mat.append_rows(rows, payloads).unwrap()
    }

    #[test]
    fn header_ring_skips_secondary_columns() {
        let mat: Matrix<()> = Matrix::new(vec![
            ColumnKind::Primary,
            ColumnKind::Secondary,
            ColumnKind::Primary,
        ]);

        let mut ring = vec![];
        let mut c = mat.right(mat.head());
        while c != mat.head() {
            ring.push(c);
            c = mat.right(c);
        }
        assert_eq!(ring, vec![1, 3]);

        // The secondary header is self-linked horizontally.
        assert_eq!(mat.right(2), 2);
        assert_eq!(mat.left(2), 2);
    }

    #[test]
    fn append_row_links_nodes_and_counts_sizes() {
        let mut mat = Matrix::new(primary(3));
        let ids = append_all(&mut mat, &[vec![0, 2], vec![0], vec![1, 2]]);
        assert_eq!(ids, vec![0, 1, 2]);

        assert_eq!(mat.col_size(1), 2);
        assert_eq!(mat.col_size(2), 1);
        assert_eq!(mat.col_size(3), 2);

        // Column 1 holds rows 0 and 1 top to bottom.
        let first = mat.down(1);
        let second = mat.down(first);
        assert_eq!(mat.row_of(first), 0);
        assert_eq!(mat.row_of(second), 1);
        assert_eq!(mat.down(second), 1);
    }

    #[test]
    fn append_row_rejects_bad_indices() {
        let mut mat = Matrix::new(primary(2));
        assert_eq!(
            mat.append_row(&[2], 0),
            Err(MatrixError::ColumnOutOfRange { col: 2, col_count: 2 })
        );
        assert_eq!(
            mat.append_row(&[1, 1], 0),
            Err(MatrixError::DuplicateColumn { col: 1 })
        );
        // Nothing was linked by the failed appends.
        assert_eq!(mat.row_count(), 0);
        assert_eq!(mat.col_size(1), 0);
        assert_eq!(mat.col_size(2), 0);
    }

    #[test]
    fn empty_row_gets_identity_but_no_nodes() {
        let mut mat = Matrix::new(primary(2));
        let ids = append_all(&mut mat, &[vec![], vec![0]]);
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(mat.col_size(1), 1);
        assert_eq!(mat.row_of(mat.down(1)), 1);
    }

    #[test]
    fn cover_then_uncover_restores_every_link() {
        let mut mat = Matrix::new(primary(4));
        append_all(&mut mat, &[vec![0, 1], vec![1, 2], vec![2, 3], vec![0, 3], vec![1, 3]]);

        let before_pool = mat.pool.clone();
        let before_sizes = mat.col_size.clone();

        for col in 1..=4 {
            let updates = mat.cover_col(col);
            assert!(updates >= 1);
            mat.uncover_col(col);
            assert_eq!(mat.pool, before_pool);
            assert_eq!(mat.col_size, before_sizes);
        }

        // Nested pairs restore too.
        mat.cover_col(1);
        mat.cover_col(3);
        mat.uncover_col(3);
        mat.uncover_col(1);
        assert_eq!(mat.pool, before_pool);
        assert_eq!(mat.col_size, before_sizes);
    }

    #[test]
    fn cover_counts_link_updates() {
        let mut mat = Matrix::new(primary(3));
        append_all(&mut mat, &[vec![0, 1, 2], vec![0, 1]]);

        // Header unlink plus the three sibling nodes of the two hidden rows.
        assert_eq!(mat.cover_col(1), 4);
        mat.uncover_col(1);
    }
}
