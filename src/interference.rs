//! The cross-line consistency store for nonogram grids.
//!
//! Every grid cell is constrained twice, once by its row line and once by its
//! column line. Encoding that as exact-cover columns would need a column per
//! `(cell, color)` pair; instead the cell colors live here, outside the
//! matrix, and the search consults this store before committing a placement.

use std::fmt::{self, Display};

use crate::line::{paint_at, Axis, Paint, Placement};
use crate::puzzle::{code_char, ColorCode};
use crate::solver::Interference;

/// Per-cell color state for an `nxs` x `nys` grid.
///
/// Each cell has two independent slots: the color committed by its row line
/// and the color committed by its column line. A placement is selectable only
/// if its line's slot is free on the whole line and it agrees with every
/// committed crossing line. Selecting then unselecting a line restores the
/// board exactly, which is what lets the search backtrack through here.
pub struct ColorGrid {
    nxs: usize,
    nys: usize,
    x_color: Vec<Option<ColorCode>>,
    y_color: Vec<Option<ColorCode>>,
}

impl ColorGrid {
    /// Creates a fully unset board for `nxs` row lines of `nys` cells each.
    pub fn new(nxs: usize, nys: usize) -> ColorGrid {
        ColorGrid {
            nxs,
            nys,
            x_color: vec![None; nxs * nys],
            y_color: vec![None; nxs * nys],
        }
    }

    // Cells are addressed linearly, row line by row line.
    #[inline]
    fn cell(&self, xid: usize, yid: usize) -> usize {
        xid * self.nys + yid
    }

    /// Returns whether row line `xid` is free and `cells` agrees with every
    /// committed column line crossing it.
    pub fn x_selectable(&self, xid: usize, cells: &[Paint]) -> bool {
        (0..self.nys).all(|yid| {
            let id = self.cell(xid, yid);
            self.x_color[id].is_none()
                && self.y_color[id].map_or(true, |y| y == paint_at(cells, yid))
        })
    }

    /// Commits `cells` as the coloring of row line `xid`.
    pub fn x_select(&mut self, xid: usize, cells: &[Paint]) {
        for yid in 0..self.nys {
            let id = self.cell(xid, yid);
            self.x_color[id] = Some(paint_at(cells, yid));
        }
    }

    /// Reverts the commit of row line `xid`.
    pub fn x_unselect(&mut self, xid: usize) {
        for yid in 0..self.nys {
            let id = self.cell(xid, yid);
            self.x_color[id] = None;
        }
    }

    /// Returns whether column line `yid` is free and `cells` agrees with
    /// every committed row line crossing it.
    pub fn y_selectable(&self, yid: usize, cells: &[Paint]) -> bool {
        (0..self.nxs).all(|xid| {
            let id = self.cell(xid, yid);
            self.y_color[id].is_none()
                && self.x_color[id].map_or(true, |x| x == paint_at(cells, xid))
        })
    }

    /// Commits `cells` as the coloring of column line `yid`.
    pub fn y_select(&mut self, yid: usize, cells: &[Paint]) {
        for xid in 0..self.nxs {
            let id = self.cell(xid, yid);
            self.y_color[id] = Some(paint_at(cells, xid));
        }
    }

    /// Reverts the commit of column line `yid`.
    pub fn y_unselect(&mut self, yid: usize) {
        for xid in 0..self.nxs {
            let id = self.cell(xid, yid);
            self.y_color[id] = None;
        }
    }
}

impl Interference<Placement> for ColorGrid {
    fn selectable(&self, placement: &Placement) -> bool {
        match placement.axis {
            Axis::X => self.x_selectable(placement.line, &placement.cells),
            Axis::Y => self.y_selectable(placement.line, &placement.cells),
        }
    }

    fn select(&mut self, placement: &Placement) {
        match placement.axis {
            Axis::X => self.x_select(placement.line, &placement.cells),
            Axis::Y => self.y_select(placement.line, &placement.cells),
        }
    }

    fn unselect(&mut self, placement: &Placement) {
        match placement.axis {
            Axis::X => self.x_unselect(placement.line),
            Axis::Y => self.y_unselect(placement.line),
        }
    }
}

/// Renders the partially committed board, one character per cell: `.` when
/// both slots are unset, the committed color when they agree or only one is
/// set, `X` on a conflict (which a well-behaved search never produces).
impl Display for ColorGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for xid in 0..self.nxs {
            for yid in 0..self.nys {
                let id = self.cell(xid, yid);
                let ch = match (self.x_color[id], self.y_color[id]) {
                    (None, None) => '.',
                    (Some(c), None) | (None, Some(c)) => code_char(c),
                    (Some(x), Some(y)) if x == y => code_char(x),
                    _ => 'X',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
