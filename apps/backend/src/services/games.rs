//! Moves, rotations and state reads for active games.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{publish_best_effort, require};
use crate::domain::{Board, Direction, Game, MoveRecord};
use crate::errors::domain::DomainError;
use crate::ranking::RankingStore;
use crate::realtime::{EventNotifier, GameEvent};
use crate::store::SessionStore;

/// Result of an accepted move or rotation.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub game: Game,
    pub record: MoveRecord,
    /// Rotated grid before settling; rotations only.
    pub rotated_board: Option<Board>,
}

pub struct GameService {
    store: Arc<SessionStore>,
    notifier: Arc<dyn EventNotifier>,
    ranking: Arc<dyn RankingStore>,
}

impl GameService {
    pub fn new(
        store: Arc<SessionStore>,
        notifier: Arc<dyn EventNotifier>,
        ranking: Arc<dyn RankingStore>,
    ) -> Self {
        Self {
            store,
            notifier,
            ranking,
        }
    }

    /// Current state of an active game.
    pub fn state(&self, game_id: &str) -> Result<Game, DomainError> {
        let game_id = require("game_id", game_id)?;
        self.store
            .game(game_id)
            .ok_or_else(|| DomainError::game_not_found(game_id))
    }

    pub async fn make_move(
        &self,
        game_id: &str,
        player_id: &str,
        column: i64,
    ) -> Result<TurnOutcome, DomainError> {
        let player_id = require("player_id", player_id)?;
        debug!(game_id, player_id, column, "Applying move");
        self.run_turn(game_id, |game| {
            game.apply_move(player_id, column).map(|record| (record, None))
        })
        .await
    }

    pub async fn rotate(
        &self,
        game_id: &str,
        player_id: &str,
        direction: Direction,
    ) -> Result<TurnOutcome, DomainError> {
        let player_id = require("player_id", player_id)?;
        debug!(game_id, player_id, ?direction, "Applying rotation");
        self.run_turn(game_id, |game| {
            game.apply_rotation(player_id, direction)
                .map(|(record, rotated)| (record, Some(rotated)))
        })
        .await
    }

    /// Lock, check out, apply, write back, publish; then credit any win.
    async fn run_turn<F>(&self, game_id: &str, apply: F) -> Result<TurnOutcome, DomainError>
    where
        F: FnOnce(&mut Game) -> Result<(MoveRecord, Option<Board>), DomainError>,
    {
        let game_id = require("game_id", game_id)?;
        let guard = self.store.lock_game(game_id).await;

        let mut game = self
            .store
            .game(game_id)
            .ok_or_else(|| DomainError::game_not_found(game_id))?;
        let (record, rotated_board) = apply(&mut game)?;

        if game.is_finished() {
            self.store.remove_game(game_id);
            info!(
                game_id,
                winner = ?game.winner(),
                rotated = record.rotated,
                "Game finished"
            );
        } else {
            self.store.put_game(game.clone());
        }

        // Still under the game lock so subscribers observe mutation order.
        publish_best_effort(
            self.notifier.as_ref(),
            game_id,
            GameEvent::GameMove {
                game: game.clone(),
                record: record.clone(),
                rotated_board: rotated_board.clone(),
            },
        )
        .await;
        drop(guard);

        if let Some(winner) = game.winner_name() {
            if let Err(err) = self.ranking.record_win(winner).await {
                warn!(game_id, player_name = winner, error = %err, "Failed to record win");
            }
        }

        Ok(TurnOutcome {
            game,
            record,
            rotated_board,
        })
    }
}
