//! Clue specifications and the plain-text puzzle format.
//!
//! A puzzle file is a single content block `<rowclues> | <colclues>`, where
//! each side lists one line clue per grid line separated by `/`, and a line
//! clue lists blocks separated by `,`. A block is digits then letters:
//! the digits are the run length, the letters (first one significant) name
//! the color, and no letters means a monochrome fill. `3/1,1 | 2/1/2` is a
//! 2-row, 3-column puzzle.

use std::error::Error;
use std::fmt::Display;

/// A cell color as stored and compared by the solver.
///
/// 0 is a blank cell, 1 a monochrome fill, and `2 + (letter - 'a')` a cell of
/// that letter-named color.
pub type ColorCode = u8;

/// Code of an unpainted cell.
pub const BLANK: ColorCode = 0;
/// Code of a monochrome filled cell.
pub const FILLED: ColorCode = 1;

/// Maps a color code to its rendered character: `0` blank, `1` monochrome
/// fill, the color letter otherwise.
pub fn code_char(code: ColorCode) -> char {
    match code {
        BLANK => '0',
        FILLED => '1',
        letter => (b'a' + letter - 2) as char,
    }
}

/// One run of consecutive painted cells in a line clue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub len: usize,
    /// Color name; empty means monochrome fill.
    pub color: String,
}

impl Block {
    /// The color code this block paints with.
    pub fn code(&self) -> ColorCode {
        match self.color.chars().next() {
            None => FILLED,
            Some(c) => 2 + (c.to_ascii_lowercase() as u8 - b'a'),
        }
    }
}

/// The ordered blocks describing one grid line.
pub type LineClue = Vec<Block>;

/// A parsed puzzle: one clue per row line and one per column line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleSpec {
    pub rows: Vec<LineClue>,
    pub cols: Vec<LineClue>,
}

const DIMS_SEPARATOR: char = '|';
const LINE_SEPARATOR: char = '/';
const BLOCK_SEPARATOR: char = ',';

/// An error returned when puzzle text does not follow the format.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The content does not contain exactly one `|`.
    MissingSeparator,
    /// A clue block is not digits followed by letters.
    BadBlock { token: String },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MissingSeparator => {
                write!(f, "expected exactly one '{}' between row and column clues", DIMS_SEPARATOR)
            }
            ParseError::BadBlock { token } => {
                write!(f, "malformed clue block '{}'", token)
            }
        }
    }
}

impl Error for ParseError {}

impl PuzzleSpec {
    /// Parses puzzle text. Whitespace around blocks is tolerated, so files
    /// may end in a newline.
    pub fn parse(input: &str) -> Result<PuzzleSpec, ParseError> {
        let mut dims = input.split(DIMS_SEPARATOR);
        let (rows, cols) = match (dims.next(), dims.next(), dims.next()) {
            (Some(rows), Some(cols), None) => (rows, cols),
            _ => return Err(ParseError::MissingSeparator),
        };
        Ok(PuzzleSpec {
            rows: parse_lines(rows)?,
            cols: parse_lines(cols)?,
        })
    }

    /// Number of row lines.
    pub fn height(&self) -> usize { self.rows.len() }

    /// Number of column lines.
    pub fn width(&self) -> usize { self.cols.len() }
}

fn parse_lines(side: &str) -> Result<Vec<LineClue>, ParseError> {
    side.split(LINE_SEPARATOR).map(parse_line).collect()
}

fn parse_line(line: &str) -> Result<LineClue, ParseError> {
    line.split(BLOCK_SEPARATOR).map(parse_block).collect()
}

fn parse_block(token: &str) -> Result<Block, ParseError> {
    let token = token.trim();
    let bad = || ParseError::BadBlock { token: token.to_string() };

    let digits_end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    let (digits, letters) = token.split_at(digits_end);
    if digits.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(bad());
    }

    Ok(Block {
        len: digits.parse().map_err(|_| bad())?,
        color: letters.to_string(),
    })
}
