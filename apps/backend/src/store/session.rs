//! In-process session state: the waiting queue, tentative pairings and active games.
//!
//! `SessionStore` is the single owner of every `Game`, `TentativeMatch` and
//! `WaitingPlayer`. Callers check out clones and write them back under the
//! matching lock.

use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;
use tokio::sync::{Mutex, MutexGuard, OwnedMutexGuard};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::cache::ExpiringCache;
use super::locks::KeyedLocks;
use crate::clock::Clock;
use crate::domain::{Game, TentativeMatch, WaitingPlayer};

/// Cache key under which the whole waiting queue is stored.
pub const WAITING_PLAYERS_KEY: &str = "waiting_players";

/// Entry lifetimes for the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTtls {
    /// Waiting queue and tentative pairings.
    pub queue: Duration,
    /// Active games, refreshed on every write.
    pub game: Duration,
}

impl Default for StoreTtls {
    fn default() -> Self {
        Self {
            queue: Duration::from_secs(30),
            game: Duration::from_secs(300),
        }
    }
}

/// What one sweep removed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub queue: usize,
    pub tentative: usize,
    pub games: usize,
    pub locks: usize,
}

impl SweepReport {
    pub fn total(&self) -> usize {
        self.queue + self.tentative + self.games + self.locks
    }
}

pub struct SessionStore {
    clock: Arc<dyn Clock>,
    ttls: StoreTtls,
    queue: ExpiringCache<&'static str, Vec<WaitingPlayer>>,
    queue_lock: Mutex<()>,
    tentative: ExpiringCache<String, TentativeMatch>,
    games: ExpiringCache<String, Game>,
    game_locks: KeyedLocks<String>,
}

impl SessionStore {
    pub fn new(clock: Arc<dyn Clock>, ttls: StoreTtls) -> Self {
        Self {
            queue: ExpiringCache::new(clock.clone()),
            queue_lock: Mutex::new(()),
            tentative: ExpiringCache::new(clock.clone()),
            games: ExpiringCache::new(clock.clone()),
            game_locks: KeyedLocks::new(),
            clock,
            ttls,
        }
    }

    pub fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }

    pub fn ttls(&self) -> StoreTtls {
        self.ttls
    }

    // ---- waiting queue ----

    /// Serialize pop-or-append on the waiting queue.
    pub async fn lock_queue(&self) -> MutexGuard<'_, ()> {
        self.queue_lock.lock().await
    }

    pub fn waiting_players(&self) -> Vec<WaitingPlayer> {
        self.queue.get(&WAITING_PLAYERS_KEY).unwrap_or_default()
    }

    /// Replace the queue, refreshing its TTL. An empty queue is removed.
    pub fn set_waiting_players(&self, players: Vec<WaitingPlayer>) {
        if players.is_empty() {
            self.queue.delete(&WAITING_PLAYERS_KEY);
        } else {
            self.queue
                .set(WAITING_PLAYERS_KEY, players, self.ttls.queue);
        }
    }

    // ---- tentative pairings ----

    pub fn tentative(&self, game_id: &str) -> Option<TentativeMatch> {
        self.tentative.get(&game_id.to_string())
    }

    pub fn put_tentative(&self, pairing: TentativeMatch) {
        self.tentative
            .set(pairing.game_id.clone(), pairing, self.ttls.queue);
    }

    pub fn remove_tentative(&self, game_id: &str) -> Option<TentativeMatch> {
        self.tentative.delete(&game_id.to_string())
    }

    // ---- active games ----

    /// Exclusive access to one game id, held across the read-modify-write.
    pub async fn lock_game(&self, game_id: &str) -> OwnedMutexGuard<()> {
        self.game_locks.lock(&game_id.to_string()).await
    }

    pub fn game(&self, game_id: &str) -> Option<Game> {
        self.games.get(&game_id.to_string())
    }

    /// Store `game`, refreshing its inactivity TTL.
    pub fn put_game(&self, game: Game) {
        self.games.set(game.id().to_string(), game, self.ttls.game);
    }

    pub fn remove_game(&self, game_id: &str) -> Option<Game> {
        self.games.delete(&game_id.to_string())
    }

    pub fn active_games(&self) -> usize {
        self.games.len()
    }

    // ---- maintenance ----

    pub fn sweep(&self) -> SweepReport {
        SweepReport {
            queue: self.queue.sweep(),
            tentative: self.tentative.sweep(),
            games: self.games.sweep(),
            locks: self.game_locks.prune(),
        }
    }

    /// Run [`SessionStore::sweep`] every `every` for the life of the process.
    pub fn spawn_sweeper(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        info!(interval_secs = every.as_secs(), "Starting session store sweeper");
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // First tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let report = self.sweep();
                if report.total() > 0 {
                    debug!(
                        queue = report.queue,
                        tentative = report.tentative,
                        games = report.games,
                        locks = report.locks,
                        "Swept expired session entries"
                    );
                }
            }
        })
    }
}
