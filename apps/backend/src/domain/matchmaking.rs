//! Queue entries and tentative pairings.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::board::{Board, Color};
use super::game::{Game, Participant};
use crate::errors::domain::DomainError;

/// A player waiting for an opponent. `game_id` is allocated at enqueue time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingPlayer {
    pub player_id: String,
    pub player_name: String,
    pub game_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

impl WaitingPlayer {
    /// True once the entry has waited longer than `ttl`.
    pub fn is_stale(&self, now: OffsetDateTime, ttl: Duration) -> bool {
        now - self.joined_at > ttl
    }
}

/// Pairing proposed by find-match, awaiting both confirmations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TentativeMatch {
    pub game_id: String,
    pub players: [Participant; 2],
    pub confirmed: [bool; 2],
}

impl TentativeMatch {
    /// Pair the queued player (Red) with the newcomer (Yellow).
    pub fn pair(waiting: &WaitingPlayer, player_id: &str, player_name: &str) -> Self {
        Self {
            game_id: waiting.game_id.clone(),
            players: [
                Participant {
                    player_id: waiting.player_id.clone(),
                    player_name: waiting.player_name.clone(),
                    color: Color::Red,
                },
                Participant {
                    player_id: player_id.to_string(),
                    player_name: player_name.to_string(),
                    color: Color::Yellow,
                },
            ],
            confirmed: [false, false],
        }
    }

    /// Record an acknowledgement. Returns true once both players confirmed.
    pub fn confirm(&mut self, player_id: &str) -> Result<bool, DomainError> {
        let seat = self
            .players
            .iter()
            .position(|p| p.player_id == player_id)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "Player {player_id} is not part of match {}",
                    self.game_id
                ))
            })?;
        self.confirmed[seat] = true;
        Ok(self.is_confirmed())
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed.iter().all(|&c| c)
    }

    pub fn opponent_of(&self, player_id: &str) -> Option<&Participant> {
        self.players.iter().find(|p| p.player_id != player_id)
    }

    /// Start play on an empty board of the given size.
    pub fn into_game(self, rows: usize, cols: usize) -> Game {
        Game::start(self.game_id, Board::new(rows, cols), self.players)
    }
}
