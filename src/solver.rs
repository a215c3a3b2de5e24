//! The depth-first search over a [`Matrix`], with an optional interference hook.
//!
//! The search is a lazy producer: [`Solver::solve`] returns a [`Solutions`]
//! iterator that suspends exactly at each emitted cover and resumes from the
//! same search state on the next call. The whole DFS state lives in explicit
//! stacks, so suspension is just returning from `next`.

use log::debug;

use crate::dlx::matrix::{Matrix, RowId};
use crate::dlx::selector::{ColumnSelector, MinSize};

/// Cross-row consistency consulted by the search before it commits a row.
///
/// The search guarantees strict nesting on every path: `selectable` is asked
/// first, `select` is called only if it answered yes, and every `select` is
/// matched by exactly one `unselect` when the row is retracted.
pub trait Interference<P> {
    /// Returns whether committing the row with this payload keeps the shared
    /// state consistent.
    fn selectable(&self, payload: &P) -> bool;
    /// Commits the row.
    fn select(&mut self, payload: &P);
    /// Retracts a previously committed row.
    fn unselect(&mut self, payload: &P);
}

/// The trivial interference: accepts every row and keeps no state.
#[derive(Default)]
pub struct NoInterference;

impl<P> Interference<P> for NoInterference {
    fn selectable(&self, _payload: &P) -> bool { true }
    fn select(&mut self, _payload: &P) {}
    fn unselect(&mut self, _payload: &P) {}
}

/// Per-depth search counters: rows tried and link updates performed.
#[derive(Default)]
#[cfg_attr(test, derive(Debug))]
pub struct Statistics {
    pub nodes: Vec<u64>,
    pub updates: Vec<u64>,
}

impl Statistics {
    fn reach_depth(&mut self, depth: usize) {
        if self.nodes.len() <= depth {
            self.nodes.resize(depth + 1, 0);
        }
        if self.updates.len() <= depth {
            self.updates.resize(depth + 1, 0);
        }
    }

    /// Total rows tried across all depths.
    pub fn total_nodes(&self) -> u64 { self.nodes.iter().sum() }

    /// Total link updates across all depths.
    pub fn total_updates(&self) -> u64 { self.updates.iter().sum() }
}

/// A depth-first exact-cover solver over a [`Matrix`].
///
/// The plain solver accepts every row; [`Solver::with_interference`] installs
/// a consistency store that can veto rows and gets notified of every commit
/// and retraction.
pub struct Solver<P, I = NoInterference, S = MinSize> {
    matrix: Matrix<P>,
    interference: I,
    selector: S,
    stats: Statistics,
    partial: Vec<RowId>,
}

impl<P> Solver<P> {
    /// Creates a solver over `matrix` with no interference and the
    /// minimum-size column selector.
    pub fn new(matrix: Matrix<P>) -> Solver<P> {
        Solver {
            matrix,
            interference: NoInterference,
            selector: MinSize,
            stats: Statistics::default(),
            partial: vec![],
        }
    }
}

impl<P, I: Interference<P>, S: ColumnSelector<P>> Solver<P, I, S> {
    /// Installs an interference store, replacing the current one.
    pub fn with_interference<J: Interference<P>>(self, interference: J) -> Solver<P, J, S> {
        Solver {
            matrix: self.matrix,
            interference,
            selector: self.selector,
            stats: self.stats,
            partial: self.partial,
        }
    }

    /// Installs a column selector, replacing the current one.
    pub fn with_selector<T: ColumnSelector<P>>(self, selector: T) -> Solver<P, I, T> {
        Solver {
            matrix: self.matrix,
            interference: self.interference,
            selector,
            stats: self.stats,
            partial: self.partial,
        }
    }

    /// Returns a reference to the underlying matrix.
    pub fn matrix(&self) -> &Matrix<P> { &self.matrix }

    /// Returns a reference to the installed interference store.
    pub fn interference(&self) -> &I { &self.interference }

    /// Returns the search counters accumulated so far.
    pub fn statistics(&self) -> &Statistics { &self.stats }

    /// Returns the payload of a row, e.g. one found in an emitted solution.
    pub fn payload(&self, row: RowId) -> &P { self.matrix.payload(row) }

    /// Starts (or restarts) the search and returns the lazy solution producer.
    ///
    /// Dropping the producer mid-search unwinds every pending cover and commit,
    /// leaving the matrix and the interference store as they were before the
    /// call. Statistics are kept across calls.
    pub fn solve(&mut self) -> Solutions<'_, P, I, S> {
        debug!(
            "starting search: {} columns, {} rows",
            self.matrix.col_count(),
            self.matrix.row_count(),
        );
        debug_assert!(self.partial.is_empty());
        Solutions {
            solver: self,
            tasks: vec![Task::Descend],
            cols: vec![],
            rows: vec![],
            finished: false,
        }
    }
}

/// One resumable step of the depth-first search.
///
/// Every active depth owns exactly one entry here: `TryRow` while scanning its
/// column's rows, `Retract` while a row is committed and a deeper level runs.
/// A single `Descend` may sit on top for the level about to open.
enum Task {
    Descend,
    TryRow,
    Retract,
}

/// A lazy producer of exact covers, returned by [`Solver::solve`].
///
/// Each emitted solution is the list of chosen row identities. Emission order
/// is deterministic: it follows the column selector and top-to-bottom row
/// order within each column.
pub struct Solutions<'a, P, I: Interference<P>, S: ColumnSelector<P>> {
    solver: &'a mut Solver<P, I, S>,
    tasks: Vec<Task>,
    cols: Vec<usize>, // covered branch column per open depth
    rows: Vec<usize>, // row cursor per open depth
    finished: bool,
}

impl<P, I: Interference<P>, S: ColumnSelector<P>> Iterator for Solutions<'_, P, I, S> {
    type Item = Vec<RowId>;

    fn next(&mut self) -> Option<Vec<RowId>> {
        while let Some(task) = self.tasks.pop() {
            match task {
                Task::Descend => {
                    let s = &mut *self.solver;
                    if s.matrix.right(s.matrix.head()) == s.matrix.head() {
                        // Complete cover. The level ends here, so nothing is
                        // pushed; resuming picks up at the parent's Retract.
                        return Some(s.partial.clone());
                    }

                    let depth = self.cols.len();
                    s.stats.reach_depth(depth);

                    let col = s.selector.pick(&s.matrix);
                    if col == s.matrix.head() || s.matrix.col_size(col) == 0 {
                        continue; // dead end
                    }

                    s.stats.updates[depth] += s.matrix.cover_col(col);
                    self.cols.push(col);
                    self.rows.push(s.matrix.down(col));
                    self.tasks.push(Task::TryRow);
                }
                Task::TryRow => {
                    let s = &mut *self.solver;
                    let col = *self.cols.last().unwrap();
                    let r = *self.rows.last().unwrap();

                    if r == col {
                        // Every row of this column has been tried.
                        s.matrix.uncover_col(col);
                        self.cols.pop();
                        self.rows.pop();
                        continue;
                    }

                    let row = s.matrix.row_of(r);
                    if !s.interference.selectable(s.matrix.payload(row)) {
                        *self.rows.last_mut().unwrap() = s.matrix.down(r);
                        self.tasks.push(Task::TryRow);
                        continue;
                    }

                    s.interference.select(s.matrix.payload(row));
                    s.partial.push(row);
                    s.stats.nodes[self.cols.len() - 1] += 1;

                    let mut j = s.matrix.right(r);
                    while j != r {
                        s.matrix.cover_col(s.matrix.col_of(j));
                        j = s.matrix.right(j);
                    }

                    self.tasks.push(Task::Retract);
                    self.tasks.push(Task::Descend);
                }
                Task::Retract => {
                    let r = *self.rows.last().unwrap();
                    self.retract_row(r);
                    *self.rows.last_mut().unwrap() = self.solver.matrix.down(r);
                    self.tasks.push(Task::TryRow);
                }
            }
        }

        if !self.finished {
            self.finished = true;
            debug_assert!(self.solver.partial.is_empty());
            debug!(
                "search exhausted: {} nodes, {} updates",
                self.solver.stats.total_nodes(),
                self.solver.stats.total_updates(),
            );
        }
        None
    }
}

impl<P, I: Interference<P>, S: ColumnSelector<P>> Solutions<'_, P, I, S> {
    /// Returns the solver driving this search, e.g. to decode the payloads of
    /// an emitted solution between pulls.
    pub fn solver(&self) -> &Solver<P, I, S> {
        &*self.solver
    }

    /// Reverses one committed row: uncovers its sibling columns right-to-left,
    /// pops it from the partial solution and notifies the interference store.
    fn retract_row(&mut self, r: usize) {
        let s = &mut *self.solver;
        let mut j = s.matrix.left(r);
        while j != r {
            s.matrix.uncover_col(s.matrix.col_of(j));
            j = s.matrix.left(j);
        }

        let row = s.partial.pop().unwrap();
        debug_assert_eq!(row, s.matrix.row_of(r));
        s.interference.unselect(s.matrix.payload(row));
    }
}

impl<P, I: Interference<P>, S: ColumnSelector<P>> Drop for Solutions<'_, P, I, S> {
    /// Unwinds an abandoned search so the matrix, the interference store and
    /// the partial solution end up exactly as before [`Solver::solve`].
    fn drop(&mut self) {
        while let Some(task) = self.tasks.pop() {
            match task {
                Task::Descend => {}
                Task::TryRow => {
                    let col = self.cols.pop().unwrap();
                    self.rows.pop();
                    self.solver.matrix.uncover_col(col);
                }
                Task::Retract => {
                    let r = *self.rows.last().unwrap();
                    self.retract_row(r);
                    let col = self.cols.pop().unwrap();
                    self.rows.pop();
                    self.solver.matrix.uncover_col(col);
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::dlx::matrix::{ColumnKind, MatrixError};

    fn matrix_with_rows(
        cols: Vec<ColumnKind>,
        rows: &[Vec<usize>],
    ) -> Result<Matrix<usize>, MatrixError> {
        let mut mat = Matrix::new(cols);
        let payloads = (0..rows.len()).collect();
        mat.append_rows(rows, payloads)?;
        Ok(mat)
    }

    fn primary(n: usize) -> Vec<ColumnKind> {
        vec![ColumnKind::Primary; n]
    }

    #[test]
    fn solves_knuth_example() {
        // Knuth's classic 7-column instance with a unique cover.
        let mat = matrix_with_rows(
            primary(7),
            &[
                vec![2, 4, 5],
                vec![0, 3, 6],
                vec![1, 2, 5],
                vec![0, 3],
                vec![1, 6],
                vec![3, 4, 6],
            ],
        )
        .unwrap();

        let mut solver = Solver::new(mat);
        let solutions: Vec<_> = solver.solve().collect();
        assert_eq!(solutions.len(), 1);
        let mut sol = solutions[0].clone();
        sol.sort_unstable();
        assert_eq!(sol, vec![0, 3, 4]);
    }

    #[test]
    fn finds_every_cover_once() {
        let mat = matrix_with_rows(
            primary(4),
            &[vec![0], vec![1], vec![2], vec![3], vec![0, 2], vec![1, 3]],
        )
        .unwrap();

        let mut solver = Solver::new(mat);
        let mut solutions: Vec<_> = solver.solve().collect();
        solutions.iter_mut().for_each(|s| s.sort_unstable());
        solutions.sort();
        assert_eq!(
            solutions,
            vec![vec![0, 1, 2, 3], vec![0, 2, 5], vec![1, 3, 4], vec![4, 5]],
        );
    }

    #[test]
    fn secondary_columns_are_optional_but_exclusive() {
        // Rows: {A}, {A, G}, {B, G} with G secondary. G may stay uncovered,
        // but two chosen rows must not both hit it.
        let mat = matrix_with_rows(
            vec![ColumnKind::Primary, ColumnKind::Primary, ColumnKind::Secondary],
            &[vec![0], vec![0, 2], vec![1, 2]],
        )
        .unwrap();

        let mut solver = Solver::new(mat);
        let mut solutions: Vec<_> = solver.solve().collect();
        solutions.iter_mut().for_each(|s| s.sort_unstable());
        // Choosing {A, G} would hide {B, G}, leaving B uncoverable, so the
        // only cover is {A} + {B, G}.
        assert_eq!(solutions, vec![vec![0, 2]]);
    }

    #[test]
    fn empty_matrix_has_one_empty_cover() {
        let mat: Matrix<()> = Matrix::new(vec![]);
        let mut solver = Solver::new(mat);
        let solutions: Vec<_> = solver.solve().collect();
        assert_eq!(solutions, vec![vec![]]);
    }

    #[test]
    fn unsatisfiable_column_yields_nothing() {
        let mat = matrix_with_rows(primary(2), &[vec![0]]).unwrap();
        let mut solver = Solver::new(mat);
        assert_eq!(solver.solve().count(), 0);
    }

    #[test]
    fn statistics_accumulate_per_depth() {
        let mat = matrix_with_rows(primary(2), &[vec![0], vec![1]]).unwrap();
        let mut solver = Solver::new(mat);
        let count = solver.solve().count();
        assert_eq!(count, 1);
        let stats = solver.statistics();
        assert!(stats.total_nodes() >= 2);
        assert_eq!(stats.nodes.len(), stats.updates.len());
    }

    /// Counts select/unselect notifications and vetoes chosen payloads.
    #[derive(Default)]
    struct Recorder {
        rejected: Vec<usize>,
        selects: u32,
        unselects: u32,
    }

    impl Interference<usize> for Recorder {
        fn selectable(&self, payload: &usize) -> bool {
            !self.rejected.contains(payload)
        }
        fn select(&mut self, _payload: &usize) { self.selects += 1; }
        fn unselect(&mut self, _payload: &usize) { self.unselects += 1; }
    }

    #[test]
    fn interference_gate_prunes_rows() {
        let mat = matrix_with_rows(
            primary(4),
            &[vec![0], vec![1], vec![2], vec![3], vec![0, 2], vec![1, 3]],
        )
        .unwrap();

        // Veto the two pair rows; only the all-singletons cover survives.
        let mut solver = Solver::new(mat).with_interference(Recorder {
            rejected: vec![4, 5],
            ..Recorder::default()
        });
        let mut solutions: Vec<_> = solver.solve().collect();
        solutions.iter_mut().for_each(|s| s.sort_unstable());
        assert_eq!(solutions, vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn every_select_is_matched_by_an_unselect() {
        let mat = matrix_with_rows(
            primary(4),
            &[vec![0], vec![1], vec![2], vec![3], vec![0, 2], vec![1, 3]],
        )
        .unwrap();

        let mut solver = Solver::new(mat).with_interference(Recorder::default());
        let count = solver.solve().count();
        assert_eq!(count, 4);
        assert!(solver.interference().selects > 0);
        assert_eq!(solver.interference().selects, solver.interference().unselects);
    }

    #[test]
    fn dropping_mid_search_unwinds_commits() {
        let mat = matrix_with_rows(
            primary(4),
            &[vec![0], vec![1], vec![2], vec![3], vec![0, 2], vec![1, 3]],
        )
        .unwrap();

        let mut solver = Solver::new(mat).with_interference(Recorder::default());
        {
            let mut solutions = solver.solve();
            solutions.next().unwrap();
            // Abandon the producer with the DFS mid-tree.
        }
        assert_eq!(solver.interference().selects, solver.interference().unselects);

        // The matrix was restored, so a fresh search finds all four covers.
        assert_eq!(solver.solve().count(), 4);
    }

    /// Branches on the leftmost live primary column regardless of size.
    struct Leftmost;

    impl<P> ColumnSelector<P> for Leftmost {
        fn pick(&mut self, mat: &Matrix<P>) -> usize {
            mat.right(mat.head())
        }
    }

    #[test]
    fn custom_selectors_plug_in() {
        let mat = matrix_with_rows(
            primary(4),
            &[vec![0], vec![1], vec![2], vec![3], vec![0, 2], vec![1, 3]],
        )
        .unwrap();

        let mut solver = Solver::new(mat).with_selector(Leftmost);
        let mut solutions: Vec<_> = solver.solve().collect();
        solutions.iter_mut().for_each(|s| s.sort_unstable());
        solutions.sort();
        // Branch order changes, the solution set does not.
        assert_eq!(
            solutions,
            vec![vec![0, 1, 2, 3], vec![0, 2, 5], vec![1, 3, 4], vec![4, 5]],
        );
    }

    #[test]
    fn solutions_arrive_in_deterministic_order() {
        let build = || {
            matrix_with_rows(
                primary(4),
                &[vec![0], vec![1], vec![2], vec![3], vec![0, 2], vec![1, 3]],
            )
            .unwrap()
        };

        let mut first = Solver::new(build());
        let mut second = Solver::new(build());
        let a: Vec<_> = first.solve().collect();
        let b: Vec<_> = second.solve().collect();
        assert_eq!(a, b);
    }
}
