//! Board transforms: quarter-turn rotation and gravity settling.
//!
//! All functions are pure and return fresh boards. Rotating an R×C board
//! yields a C×R board.

use serde::{Deserialize, Serialize};

use super::board::{Board, Cell};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Counter-clockwise.
    Left,
    /// Clockwise.
    Right,
}

impl Direction {
    pub fn inverse(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Both stages of a rotation, kept for clients that animate the fall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation {
    pub rotated: Board,
    pub settled: Board,
}

/// Rotate a quarter turn without moving any stone relative to the grid.
pub fn rotate(board: &Board, direction: Direction) -> Board {
    let rows = board.rows();
    let cols = board.cols();
    match direction {
        Direction::Left => Board::from_fn(cols, rows, |i, j| board.get(j, cols - 1 - i)),
        Direction::Right => Board::from_fn(cols, rows, |i, j| board.get(rows - 1 - j, i)),
    }
}

/// Let every stone fall to the floor of its column, keeping column order.
pub fn apply_gravity(board: &Board) -> Board {
    let rows = board.rows();
    let cols = board.cols();

    let columns: Vec<Vec<Cell>> = (0..cols)
        .map(|col| {
            let stones: Vec<Cell> = (0..rows)
                .map(|row| board.get(row, col))
                .filter(|cell| !cell.is_empty())
                .collect();
            let mut column = vec![Cell::Empty; rows - stones.len()];
            column.extend(stones);
            column
        })
        .collect();

    Board::from_fn(rows, cols, |row, col| columns[col][row])
}

pub fn rotate_and_settle(board: &Board, direction: Direction) -> Rotation {
    let rotated = rotate(board, direction);
    let settled = apply_gravity(&rotated);
    Rotation { rotated, settled }
}
