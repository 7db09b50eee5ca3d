use std::sync::Arc;

use crate::config::Settings;
use crate::ranking::RankingStore;
use crate::realtime::EventHub;
use crate::services::{GameService, MatchCoordinator};
use crate::store::SessionStore;

/// Application state shared by every worker.
///
/// Built once at startup by [`crate::infra::state::StateBuilder`]; handlers
/// receive it through `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub store: Arc<SessionStore>,
    pub games: Arc<GameService>,
    pub matches: Arc<MatchCoordinator>,
    pub ranking: Arc<dyn RankingStore>,
    /// In-process hub when events are not routed through Redis.
    pub events: Option<Arc<EventHub>>,
}
