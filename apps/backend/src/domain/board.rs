//! Grid primitives: cells, colors and the rectangular board.
//!
//! Row 0 is the visual top; the highest row index is the floor.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::domain::DomainError;

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;

/// Number of contiguous stones that wins.
const LINE: usize = 4;

/// Scan directions as (row step, column step): horizontal, vertical and both diagonals.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Yellow,
}

impl Color {
    pub fn other(self) -> Self {
        match self {
            Color::Red => Color::Yellow,
            Color::Yellow => Color::Red,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Red,
    Yellow,
}

impl Cell {
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Color::Red),
            Cell::Yellow => Some(Color::Yellow),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        match color {
            Color::Red => Cell::Red,
            Color::Yellow => Cell::Yellow,
        }
    }
}

impl From<Option<Color>> for Cell {
    fn from(color: Option<Color>) -> Self {
        color.map(Cell::from).unwrap_or(Cell::Empty)
    }
}

// Cells travel as `null | "red" | "yellow"`.
impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.color().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Color>::deserialize(deserializer).map(Cell::from)
    }
}

/// Failure to drop a stone into a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropError {
    ColumnOutOfRange,
    ColumnFull,
}

/// Rectangular grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Board {
    cells: Vec<Vec<Cell>>,
}

impl Board {
    /// Empty board of the given size.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![vec![Cell::Empty; cols]; rows],
        }
    }

    /// Build a board cell by cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Cell) -> Self {
        let cells = (0..rows)
            .map(|row| (0..cols).map(|col| f(row, col)).collect())
            .collect();
        Self { cells }
    }

    /// Validate an externally supplied grid.
    pub fn from_rows(cells: Vec<Vec<Cell>>) -> Result<Self, DomainError> {
        let cols = match cells.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(DomainError::validation("board must have at least one cell")),
        };
        if let Some(row) = cells.iter().position(|r| r.len() != cols) {
            return Err(DomainError::validation(format!(
                "board row {row} has {} cells, expected {cols}",
                cells[row].len()
            )));
        }
        Ok(Self { cells })
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Cell at (row, col). Panics when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn is_column_full(&self, col: usize) -> bool {
        self.lowest_empty_row(col).is_none()
    }

    /// Row a stone dropped into `col` would land on.
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols() {
            return None;
        }
        (0..self.rows()).rev().find(|&row| self.cells[row][col].is_empty())
    }

    /// Drop a stone, returning the row where it landed.
    pub fn drop_piece(&mut self, col: usize, color: Color) -> Result<usize, DropError> {
        if col >= self.cols() {
            return Err(DropError::ColumnOutOfRange);
        }
        let row = self.lowest_empty_row(col).ok_or(DropError::ColumnFull)?;
        self.cells[row][col] = Cell::from(color);
        Ok(row)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    /// Whether `color` has four in a row anywhere on the board.
    pub fn has_four(&self, color: Color) -> bool {
        let target = Cell::from(color);
        let rows = self.rows() as isize;
        let cols = self.cols() as isize;

        for row in 0..rows {
            for col in 0..cols {
                for (dr, dc) in DIRECTIONS {
                    let end_row = row + dr * (LINE as isize - 1);
                    let end_col = col + dc * (LINE as isize - 1);
                    if end_row < 0 || end_row >= rows || end_col < 0 || end_col >= cols {
                        continue;
                    }
                    let line = (0..LINE as isize).all(|step| {
                        self.cells[(row + dr * step) as usize][(col + dc * step) as usize]
                            == target
                    });
                    if line {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// First color with a line of four, checking Red before Yellow.
    pub fn winner(&self) -> Option<Color> {
        [Color::Red, Color::Yellow]
            .into_iter()
            .find(|&color| self.has_four(color))
    }

    pub fn count(&self, color: Color) -> usize {
        let target = Cell::from(color);
        self.cells.iter().flatten().filter(|&&c| c == target).count()
    }

    /// Parse a compact picture of the board: `.` empty, `R` red, `Y` yellow.
    #[cfg(test)]
    pub(crate) fn from_strs(rows: &[&str]) -> Self {
        let cells = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|ch| match ch {
                        'R' => Cell::Red,
                        'Y' => Cell::Yellow,
                        _ => Cell::Empty,
                    })
                    .collect()
            })
            .collect();
        Self::from_rows(cells).expect("test board must be rectangular")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Board {
    type Error = DomainError;

    fn try_from(cells: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        Self::from_rows(cells)
    }
}

impl From<Board> for Vec<Vec<Cell>> {
    fn from(board: Board) -> Self {
        board.cells
    }
}
