//! Domain layer: pure board, engine and pairing logic.

pub mod board;
pub mod game;
pub mod matchmaking;
pub mod transform;

#[cfg(test)]
mod test_prelude;

// Re-exports for ergonomics
pub use board::{Board, Cell, Color};
pub use game::{Game, GameStatus, MoveRecord, Participant, Winner};
pub use matchmaking::{TentativeMatch, WaitingPlayer};
pub use transform::{apply_gravity, rotate, rotate_and_settle, Direction, Rotation};
