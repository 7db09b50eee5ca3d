//! Realtime event payloads, delivered on channel `game.{game_id}`.

use serde::{Deserialize, Serialize};

use crate::domain::{Board, Game, MoveRecord};

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload")]
pub enum GameEvent {
    #[serde(rename = "game.start")]
    GameStart { game: Game },

    #[serde(rename = "game.move")]
    GameMove {
        game: Game,
        #[serde(rename = "move")]
        record: MoveRecord,
        /// Rotated grid before gravity; only set for rotations.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rotated_board: Option<Board>,
    },

    #[serde(rename = "player.left")]
    PlayerLeft { player_id: String },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::GameStart { .. } => "game.start",
            GameEvent::GameMove { .. } => "game.move",
            GameEvent::PlayerLeft { .. } => "player.left",
        }
    }
}

/// Wire form used by transports that multiplex games on one connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub game_id: String,
    #[serde(flatten)]
    pub event: GameEvent,
}

pub fn channel(game_id: &str) -> String {
    format!("game.{game_id}")
}
