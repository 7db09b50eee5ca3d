//! Outbound event delivery seam.

use async_trait::async_trait;

use super::events::GameEvent;
use crate::errors::domain::DomainError;

/// Delivers game events to whoever follows `game.{game_id}`.
///
/// Failures are reported as `DomainError::Transient`; callers log and move on.
#[async_trait]
pub trait EventNotifier: Send + Sync {
    async fn publish(&self, game_id: &str, event: GameEvent) -> Result<(), DomainError>;
}
