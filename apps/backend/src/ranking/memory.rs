//! In-memory ranking store.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::info;

use super::month::MonthKey;
use super::{RankingEntry, RankingStore};
use crate::clock::Clock;
use crate::errors::domain::DomainError;

/// Win counters keyed by (canonical `YYYYMM01` month, player name).
pub struct MemoryRankingStore {
    wins: DashMap<(String, String), u32>,
    clock: Arc<dyn Clock>,
}

impl MemoryRankingStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            wins: DashMap::new(),
            clock,
        }
    }

    fn current_month(&self) -> MonthKey {
        MonthKey::containing(self.clock.now())
    }
}

#[async_trait]
impl RankingStore for MemoryRankingStore {
    async fn record_win(&self, player_name: &str) -> Result<(), DomainError> {
        let month = self.current_month();
        let wins = {
            let mut entry = self
                .wins
                .entry((month.canonical(), player_name.to_string()))
                .or_insert(0);
            *entry += 1;
            *entry
        };
        info!(player_name, year_month = %month, wins, "Recorded win");
        Ok(())
    }

    async fn monthly(&self, month: MonthKey) -> Result<Vec<RankingEntry>, DomainError> {
        let canonical = month.canonical();
        let mut entries: Vec<RankingEntry> = self
            .wins
            .iter()
            .filter(|e| e.key().0 == canonical)
            .map(|e| RankingEntry {
                player_name: e.key().1.clone(),
                wins: *e.value(),
            })
            .collect();
        entries.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then_with(|| a.player_name.cmp(&b.player_name))
        });
        Ok(entries)
    }

    async fn available_months(&self) -> Result<Vec<MonthKey>, DomainError> {
        let mut months: BTreeSet<MonthKey> = self
            .wins
            .iter()
            .filter_map(|e| MonthKey::from_canonical(&e.key().0))
            .collect();
        months.insert(self.current_month());
        Ok(months.into_iter().rev().collect())
    }
}
