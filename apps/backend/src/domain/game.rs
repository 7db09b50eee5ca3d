//! Game engine: turn validation, placements, rotations and result detection.
//!
//! Every mutating operation validates first and touches nothing on failure.

use serde::{Deserialize, Serialize};

use super::board::{Board, Color, DropError};
use super::transform::{rotate_and_settle, Direction};
use crate::errors::domain::{DomainError, InvalidMoveKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Waiting,
    Tentative,
    Playing,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Red,
    Yellow,
    Draw,
}

impl From<Color> for Winner {
    fn from(color: Color) -> Self {
        match color {
            Color::Red => Winner::Red,
            Color::Yellow => Winner::Yellow,
        }
    }
}

/// A seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub player_id: String,
    pub player_name: String,
    pub color: Color,
}

/// Broadcast description of one accepted action.
///
/// A placement carries `column`, `row` and `rotated = false`; a rotation
/// carries `direction` and `rotated = true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub column: Option<usize>,
    pub row: Option<usize>,
    pub color: Color,
    pub player_id: String,
    pub rotated: bool,
    pub direction: Option<Direction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    id: String,
    board: Board,
    players: [Participant; 2],
    current_player: Color,
    status: GameStatus,
    winner: Option<Winner>,
}

impl Game {
    /// New game in `playing` state. The first participant plays Red and moves first.
    pub fn start(id: impl Into<String>, board: Board, players: [Participant; 2]) -> Self {
        Self {
            id: id.into(),
            board,
            players,
            current_player: Color::Red,
            status: GameStatus::Playing,
            winner: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Participant; 2] {
        &self.players
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    pub fn participant(&self, player_id: &str) -> Option<&Participant> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    /// Name of the player holding the winning color, if any.
    pub fn winner_name(&self) -> Option<&str> {
        let color = match self.winner? {
            Winner::Red => Color::Red,
            Winner::Yellow => Color::Yellow,
            Winner::Draw => return None,
        };
        self.players
            .iter()
            .find(|p| p.color == color)
            .map(|p| p.player_name.as_str())
    }

    /// Drop a stone for `player_id` into `column`.
    pub fn apply_move(&mut self, player_id: &str, column: i64) -> Result<MoveRecord, DomainError> {
        let color = self.authorize(player_id)?;
        let col = usize::try_from(column)
            .ok()
            .filter(|&c| c < self.board.cols())
            .ok_or_else(|| {
                DomainError::invalid_move(
                    InvalidMoveKind::ColumnOutOfRange,
                    format!("Column {column} is outside 0..{}", self.board.cols()),
                )
            })?;

        let row = self.board.drop_piece(col, color).map_err(|e| match e {
            DropError::ColumnFull => DomainError::invalid_move(
                InvalidMoveKind::ColumnFull,
                format!("Column {col} is full"),
            ),
            DropError::ColumnOutOfRange => DomainError::invalid_move(
                InvalidMoveKind::ColumnOutOfRange,
                format!("Column {col} is out of range"),
            ),
        })?;

        self.conclude_turn();
        Ok(MoveRecord {
            column: Some(col),
            row: Some(row),
            color,
            player_id: player_id.to_string(),
            rotated: false,
            direction: None,
        })
    }

    /// Rotate the board for `player_id`; returns the record and the unsettled grid.
    pub fn apply_rotation(
        &mut self,
        player_id: &str,
        direction: Direction,
    ) -> Result<(MoveRecord, Board), DomainError> {
        let color = self.authorize(player_id)?;
        let rotation = rotate_and_settle(&self.board, direction);

        self.board = rotation.settled;
        self.conclude_turn();
        Ok((
            MoveRecord {
                column: None,
                row: None,
                color,
                player_id: player_id.to_string(),
                rotated: true,
                direction: Some(direction),
            },
            rotation.rotated,
        ))
    }

    /// Check the actor may act now, returning their color.
    fn authorize(&self, player_id: &str) -> Result<Color, DomainError> {
        if self.status != GameStatus::Playing {
            return Err(DomainError::invalid_move(
                InvalidMoveKind::GameNotActive,
                format!("Game {} is not in progress", self.id),
            ));
        }
        let participant = self.participant(player_id).ok_or_else(|| {
            DomainError::invalid_move(
                InvalidMoveKind::NotAPlayer,
                format!("Player {player_id} is not seated in game {}", self.id),
            )
        })?;
        if participant.color != self.current_player {
            return Err(DomainError::invalid_move(
                InvalidMoveKind::OutOfTurn,
                "It is not your turn",
            ));
        }
        Ok(participant.color)
    }

    /// Evaluate the settled board; finish the game or hand the turn over.
    fn conclude_turn(&mut self) {
        if let Some(color) = self.board.winner() {
            self.status = GameStatus::Finished;
            self.winner = Some(Winner::from(color));
        } else if self.board.is_full() {
            self.status = GameStatus::Finished;
            self.winner = Some(Winner::Draw);
        } else {
            self.current_player = self.current_player.other();
        }
    }

    #[cfg(test)]
    pub(crate) fn with_position(mut self, board: Board, to_move: Color) -> Self {
        self.board = board;
        self.current_player = to_move;
        self
    }
}
