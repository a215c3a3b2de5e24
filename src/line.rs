//! Enumerates the legal placements of one line's clue blocks.

use crate::puzzle::{Block, ColorCode, BLANK};

/// Which family of grid lines a placement belongs to: `X` for row lines,
/// `Y` for column lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// One painted cell of a placement: offset along the line and the color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paint {
    pub at: usize,
    pub color: ColorCode,
}

/// A concrete assignment of one line's blocks to cell positions. This is the
/// row payload of the exact-cover reduction: `axis` and `line` say which grid
/// line the placement colors, `cells` lists the painted cells in order.
#[derive(Debug, Clone)]
pub struct Placement {
    pub axis: Axis,
    pub line: usize,
    pub cells: Vec<Paint>,
}

/// Returns the color a placement paints at offset `at`, or [`BLANK`] if no
/// block covers that cell.
pub fn paint_at(cells: &[Paint], at: usize) -> ColorCode {
    cells.iter().find(|p| p.at == at).map(|p| p.color).unwrap_or(BLANK)
}

/// Enumerates every legal assignment of `blocks` to a line of `len` cells.
///
/// Placements are produced in lexicographic order of block start positions.
/// Two adjacent blocks of the same color need a separating blank; blocks of
/// different colors may abut. Zero-length blocks are dropped, so the
/// conventional `0` clue for an all-blank line yields exactly one placement,
/// the empty one.
pub fn placements(blocks: &[Block], len: usize) -> Vec<Vec<Paint>> {
    let blocks: Vec<&Block> = blocks.iter().filter(|b| b.len > 0).collect();
    let mut all = vec![];
    extend(&blocks, 0, len, &mut vec![], &mut all);
    all
}

fn extend(
    blocks: &[&Block],
    start: usize,
    len: usize,
    prefix: &mut Vec<Paint>,
    all: &mut Vec<Vec<Paint>>,
) {
    let (block, rest) = match blocks.split_first() {
        None => {
            all.push(prefix.clone());
            return;
        }
        Some(split) => split,
    };
    if block.len > len {
        return;
    }

    for at in start..=(len - block.len) {
        let mark = prefix.len();
        prefix.extend((at..at + block.len).map(|i| Paint { at: i, color: block.code() }));
        extend(rest, at + block.len + gap(block, rest.first()), len, prefix, all);
        prefix.truncate(mark);
    }
}

// A separating blank is required only before a following block of the same
// color code; the code is what the grid stores, so "a" and "Azure" count as
// the same color. Monochrome blocks all share the fill code.
fn gap(block: &Block, next: Option<&&Block>) -> usize {
    match next {
        Some(n) if n.code() == block.code() => 1,
        _ => 0,
    }
}
