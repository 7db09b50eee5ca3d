use std::sync::Arc;

use tracing::{info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::Settings;
use crate::error::AppError;
use crate::ranking::{MemoryRankingStore, RankingStore};
use crate::realtime::{EventHub, EventNotifier, RedisPublisher};
use crate::services::{GameService, MatchCoordinator};
use crate::state::app_state::AppState;
use crate::store::SessionStore;

/// Builder for creating AppState instances (used in both tests and main)
///
/// Without an explicit notifier the builder publishes through Redis when
/// `REDIS_URL` is configured and through an in-process [`EventHub`] otherwise.
pub struct StateBuilder {
    settings: Settings,
    clock: Option<Arc<dyn Clock>>,
    notifier: Option<Arc<dyn EventNotifier>>,
    ranking: Option<Arc<dyn RankingStore>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            clock: None,
            notifier: None,
            ranking: None,
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn EventNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_ranking(mut self, ranking: Arc<dyn RankingStore>) -> Self {
        self.ranking = Some(ranking);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        self.settings.validate()?;

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let store = Arc::new(SessionStore::new(
            clock.clone(),
            self.settings.game.store_ttls(),
        ));

        let (notifier, events): (Arc<dyn EventNotifier>, Option<Arc<EventHub>>) =
            match (self.notifier, self.settings.redis_url.as_deref()) {
                (Some(notifier), _) => (notifier, None),
                (None, Some(url)) => {
                    let publisher = RedisPublisher::connect(url).await?;
                    info!("Publishing game events through Redis");
                    (Arc::new(publisher), None)
                }
                (None, None) => {
                    let hub = Arc::new(EventHub::new());
                    warn!(
                        "REDIS_URL not set; game events stay in-process and reach only local subscribers"
                    );
                    (hub.clone(), Some(hub))
                }
            };

        let ranking = self
            .ranking
            .unwrap_or_else(|| Arc::new(MemoryRankingStore::new(clock.clone())));

        let games = Arc::new(GameService::new(
            store.clone(),
            notifier.clone(),
            ranking.clone(),
        ));
        let matches = Arc::new(MatchCoordinator::new(
            store.clone(),
            notifier,
            self.settings.game.board_rows,
            self.settings.game.board_cols,
        ));

        Ok(AppState {
            settings: Arc::new(self.settings),
            store,
            games,
            matches,
            ranking,
            events,
        })
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
