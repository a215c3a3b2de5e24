//! A low-level API for the dancing links (DLX) algorithm.
//!
//! If you are looking for the nonogram-facing API,
//! see the [`nonogram`](crate::nonogram) module.

pub mod matrix;
pub mod selector;

pub use matrix::{ColumnKind, Matrix, MatrixError, RowId};
pub use selector::{ColumnSelector, MinSize};
