//! [Nonogram] solver library built on Knuth's [dancing links (DLX)] algorithm.
//!
//! [Nonogram]: https://en.wikipedia.org/wiki/Nonogram
//! [dancing links (DLX)]: https://en.wikipedia.org/wiki/Dancing_Links
//!
//! # Concept
//!
//! A nonogram assigns every grid line an ordered sequence of colored runs.
//! This library reduces the puzzle to a generalized [exact cover] instance:
//! one primary column per grid line, one candidate row per legal placement
//! of that line's clue. Because each candidate covers a single column, the
//! cover constraint alone is trivial; the crossing-line agreement lives in an
//! interference store that the search consults before committing a row and
//! notifies on every commit and retraction. The same [`Matrix`]/[`Solver`]
//! pair solves plain exact cover problems when no interference is installed.
//!
//! [exact cover]: https://en.wikipedia.org/wiki/Exact_cover
//!
//! # Basic example
//!
//! ```
//! use nonocover::{Nonogram, PuzzleSpec};
//!
//! let spec = PuzzleSpec::parse("1/1,1/3 | 2/1,1/2").unwrap();
//! let puzzle = Nonogram::new(spec);
//!
//! let mut solver = puzzle.solver();
//! let solutions: Vec<_> = solver.solve().collect();
//!
//! assert_eq!(solutions.len(), 1);
//! let grid = puzzle.render(&solver, &solutions[0]);
//! assert_eq!(grid, vec!["010", "101", "111"]);
//! ```
//!
//! # Laziness
//!
//! [`Solver::solve`] returns an iterator that runs the depth-first search
//! only as far as the next solution. Dropping it mid-search unwinds every
//! pending choice, so the solver can be reused afterwards.

pub mod dlx;
pub mod interference;
pub mod line;
pub mod nonogram;
pub mod puzzle;
pub mod solver;

pub use dlx::{ColumnKind, Matrix, MatrixError, RowId};
pub use nonogram::{Nonogram, NonogramSolver};
pub use puzzle::{ParseError, PuzzleSpec};
pub use solver::{Interference, NoInterference, Solutions, Solver, Statistics};
