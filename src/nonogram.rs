//! Reduction of a nonogram puzzle to an exact-cover instance.
//!
//! The reduction gives every grid line one primary column and every legal
//! placement of that line's clue one single-entry row. The exact-cover part
//! alone just forces one placement per line; the [`ColorGrid`] installed on
//! the solver is what makes crossing lines agree cell by cell.

use indexmap::IndexMap;
use log::debug;

use crate::dlx::matrix::{ColumnKind, Matrix, RowId};
use crate::interference::ColorGrid;
use crate::line::{self, paint_at, Axis, Placement};
use crate::puzzle::{code_char, PuzzleSpec};
use crate::solver::Solver;

/// An exact-cover column: one grid line that must receive exactly one
/// placement. Insertion order into the column map fixes the matrix order.
#[derive(PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(test, derive(Debug))]
enum LineKey {
    X(usize),
    Y(usize),
}

/// The solver type produced by the reduction.
pub type NonogramSolver = Solver<Placement, ColorGrid>;

/// A nonogram puzzle, ready to be reduced and solved.
pub struct Nonogram {
    spec: PuzzleSpec,
    columns: IndexMap<LineKey, ColumnKind>,
}

impl Nonogram {
    /// Wraps a parsed clue specification.
    pub fn new(spec: PuzzleSpec) -> Nonogram {
        let mut columns = IndexMap::new();
        for x in 0..spec.height() {
            columns.insert(LineKey::X(x), ColumnKind::Primary);
        }
        for y in 0..spec.width() {
            columns.insert(LineKey::Y(y), ColumnKind::Primary);
        }
        Nonogram { spec, columns }
    }

    /// Number of grid rows.
    pub fn height(&self) -> usize { self.spec.height() }

    /// Number of grid columns.
    pub fn width(&self) -> usize { self.spec.width() }

    /// Builds the exact-cover matrix and installs the interference board.
    pub fn solver(&self) -> NonogramSolver {
        let mut mat: Matrix<Placement> = Matrix::new(self.columns.values().copied().collect());

        for (x, clue) in self.spec.rows.iter().enumerate() {
            let col = self.columns.get_index_of(&LineKey::X(x)).unwrap();
            for cells in line::placements(clue, self.width()) {
                mat.append_row(&[col], Placement { axis: Axis::X, line: x, cells })
                    .unwrap();
            }
        }
        for (y, clue) in self.spec.cols.iter().enumerate() {
            let col = self.columns.get_index_of(&LineKey::Y(y)).unwrap();
            for cells in line::placements(clue, self.height()) {
                mat.append_row(&[col], Placement { axis: Axis::Y, line: y, cells })
                    .unwrap();
            }
        }

        debug!(
            "reduced {}x{} puzzle to {} columns, {} rows",
            self.height(),
            self.width(),
            mat.col_count(),
            mat.row_count(),
        );
        Solver::new(mat).with_interference(ColorGrid::new(self.height(), self.width()))
    }

    /// Renders an emitted cover as one string of cell characters per grid
    /// row: `0` blank, `1` monochrome fill, the color letter otherwise.
    pub fn render(&self, solver: &NonogramSolver, solution: &[RowId]) -> Vec<String> {
        let mut by_line: Vec<&Placement> = solution
            .iter()
            .map(|&row| solver.payload(row))
            .filter(|p| p.axis == Axis::X)
            .collect();
        by_line.sort_by_key(|p| p.line);

        by_line
            .into_iter()
            .map(|p| (0..self.width()).map(|y| code_char(paint_at(&p.cells, y))).collect())
            .collect()
    }
}
