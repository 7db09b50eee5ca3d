//! Pairing lifecycle: waiting -> tentative -> playing, plus leave.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use super::{publish_best_effort, require};
use crate::domain::{Game, TentativeMatch, WaitingPlayer};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::realtime::{EventNotifier, GameEvent};
use crate::store::SessionStore;

/// Name used when a player does not supply one.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Waiting,
    Tentative,
}

/// Answer to a find-match request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchTicket {
    pub status: TicketStatus,
    pub game_id: String,
    pub player_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opponent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opponent_name: Option<String>,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Confirmation {
    /// Waiting for the other player to confirm.
    Pending { game_id: String },
    /// Both confirmed; the game is live.
    Started { game: Game },
}

pub struct MatchCoordinator {
    store: Arc<SessionStore>,
    notifier: Arc<dyn EventNotifier>,
    board_rows: usize,
    board_cols: usize,
}

impl MatchCoordinator {
    pub fn new(
        store: Arc<SessionStore>,
        notifier: Arc<dyn EventNotifier>,
        board_rows: usize,
        board_cols: usize,
    ) -> Self {
        Self {
            store,
            notifier,
            board_rows,
            board_cols,
        }
    }

    /// Pair with the longest-waiting player, or join the queue.
    pub async fn find_match(
        &self,
        player_id: &str,
        player_name: Option<&str>,
    ) -> Result<MatchTicket, DomainError> {
        let player_id = require("player_id", player_id)?;
        let player_name = player_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_PLAYER_NAME);

        let _queue = self.store.lock_queue().await;
        let now = self.store.now();
        let ttl = self.store.ttls().queue;

        let before = self.store.waiting_players();
        let mut queue: Vec<WaitingPlayer> = before
            .iter()
            .filter(|w| !w.is_stale(now, ttl))
            .cloned()
            .collect();
        queue.sort_by_key(|w| w.joined_at);
        if queue.len() != before.len() {
            debug!(
                purged = before.len() - queue.len(),
                "Dropped stale waiting players"
            );
        }

        if let Some(pos) = queue.iter().position(|w| w.player_id == player_id) {
            // A re-poll keeps the caller's game id but restarts their wait.
            let mut existing = queue.remove(pos);
            existing.joined_at = now;
            existing.player_name = player_name.to_string();
            let game_id = existing.game_id.clone();
            queue.push(existing);
            self.store.set_waiting_players(queue);
            debug!(player_id, game_id = %game_id, "Refreshed waiting player");
            return Ok(MatchTicket {
                status: TicketStatus::Waiting,
                game_id,
                player_id: player_id.to_string(),
                opponent_id: None,
                opponent_name: None,
            });
        }

        if !queue.is_empty() {
            let opponent = queue.remove(0);
            self.store.set_waiting_players(queue);

            let pairing = TentativeMatch::pair(&opponent, player_id, player_name);
            self.store.put_tentative(pairing);
            info!(
                game_id = %opponent.game_id,
                player_id,
                opponent_id = %opponent.player_id,
                "Tentative match created"
            );
            return Ok(MatchTicket {
                status: TicketStatus::Tentative,
                game_id: opponent.game_id,
                player_id: player_id.to_string(),
                opponent_id: Some(opponent.player_id),
                opponent_name: Some(opponent.player_name),
            });
        }

        let game_id = Uuid::new_v4().to_string();
        queue.push(WaitingPlayer {
            player_id: player_id.to_string(),
            player_name: player_name.to_string(),
            game_id: game_id.clone(),
            joined_at: now,
        });
        self.store.set_waiting_players(queue);
        info!(player_id, game_id = %game_id, "Player added to waiting queue");

        Ok(MatchTicket {
            status: TicketStatus::Waiting,
            game_id,
            player_id: player_id.to_string(),
            opponent_id: None,
            opponent_name: None,
        })
    }

    /// Acknowledge a tentative pairing; the second acknowledgement starts play.
    pub async fn confirm_match(
        &self,
        game_id: &str,
        player_id: &str,
    ) -> Result<Confirmation, DomainError> {
        let game_id = require("game_id", game_id)?;
        let player_id = require("player_id", player_id)?;
        let _guard = self.store.lock_game(game_id).await;

        // Late or repeated confirmation of a game that already started.
        if let Some(game) = self.store.game(game_id) {
            if game.participant(player_id).is_none() {
                return Err(DomainError::validation(format!(
                    "Player {player_id} is not part of game {game_id}"
                )));
            }
            return Ok(Confirmation::Started { game });
        }

        let mut pairing = self.store.tentative(game_id).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Match,
                format!("Match {game_id} not found or expired"),
            )
        })?;

        if !pairing.confirm(player_id)? {
            self.store.put_tentative(pairing);
            debug!(game_id, player_id, "Match confirmation recorded");
            return Ok(Confirmation::Pending {
                game_id: game_id.to_string(),
            });
        }

        self.store.remove_tentative(game_id);
        let game = pairing.into_game(self.board_rows, self.board_cols);
        self.store.put_game(game.clone());
        info!(game_id, "Game started");

        publish_best_effort(
            self.notifier.as_ref(),
            game_id,
            GameEvent::GameStart { game: game.clone() },
        )
        .await;

        Ok(Confirmation::Started { game })
    }

    /// Abandon a game, a pairing or the queue. Always succeeds.
    ///
    /// Holds the queue lock throughout; lock order is queue, then game.
    pub async fn leave(&self, game_id: &str, player_id: &str) -> Result<(), DomainError> {
        let game_id = require("game_id", game_id)?;
        let player_id = require("player_id", player_id)?;

        let _queue = self.store.lock_queue().await;
        let queue = self.store.waiting_players();
        let remaining: Vec<WaitingPlayer> = queue
            .iter()
            .filter(|w| w.player_id != player_id)
            .cloned()
            .collect();
        if remaining.len() != queue.len() {
            debug!(player_id, remaining = remaining.len(), "Removed player from waiting queue");
            self.store.set_waiting_players(remaining);
        }

        let _guard = self.store.lock_game(game_id).await;
        let removed_game = self.store.remove_game(game_id);
        let removed_pairing = self.store.remove_tentative(game_id);

        if let Some(game) = &removed_game {
            info!(game_id, player_id, status = ?game.status(), "Player left game");
        }
        if removed_pairing.is_some() {
            info!(game_id, player_id, "Player left tentative match");
        }
        if removed_game.is_some() || removed_pairing.is_some() {
            publish_best_effort(
                self.notifier.as_ref(),
                game_id,
                GameEvent::PlayerLeft {
                    player_id: player_id.to_string(),
                },
            )
            .await;
        }

        Ok(())
    }
}
