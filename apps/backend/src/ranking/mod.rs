//! Monthly win ranking.

pub mod memory;
pub mod month;

use async_trait::async_trait;
use serde::Serialize;

pub use memory::MemoryRankingStore;
pub use month::MonthKey;

use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    pub player_name: String,
    pub wins: u32,
}

/// Persistent win counters, bucketed by calendar month.
#[async_trait]
pub trait RankingStore: Send + Sync {
    /// Credit one win to `player_name` in the current month.
    async fn record_win(&self, player_name: &str) -> Result<(), DomainError>;

    /// Leaderboard for `month`, most wins first, ties by name.
    async fn monthly(&self, month: MonthKey) -> Result<Vec<RankingEntry>, DomainError>;

    /// Months with any recorded win plus the current month, newest first.
    async fn available_months(&self) -> Result<Vec<MonthKey>, DomainError>;
}
