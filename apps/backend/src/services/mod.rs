//! Request-scoped orchestration around the engine and the session store.

pub mod games;
pub mod matchmaking;

use tracing::warn;

use crate::errors::domain::DomainError;
use crate::realtime::{EventNotifier, GameEvent};

pub use games::{GameService, TurnOutcome};
pub use matchmaking::{Confirmation, MatchCoordinator, MatchTicket, TicketStatus};

/// Trimmed, non-empty request field.
pub(crate) fn require<'a>(field: &str, value: &'a str) -> Result<&'a str, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(trimmed)
}

/// Publish an event; delivery failures are logged and never surface.
pub(crate) async fn publish_best_effort(
    notifier: &dyn EventNotifier,
    game_id: &str,
    event: GameEvent,
) {
    let name = event.name();
    if let Err(err) = notifier.publish(game_id, event).await {
        warn!(game_id, event = name, error = %err, "Event delivery failed");
    }
}
