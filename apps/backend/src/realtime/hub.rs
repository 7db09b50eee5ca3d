//! In-process event fan-out, one broadcast channel per game.

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::debug;

use super::events::GameEvent;
use super::notifier::EventNotifier;
use crate::errors::domain::DomainError;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Default)]
pub struct EventHub {
    channels: DashMap<String, broadcast::Sender<GameEvent>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    pub fn subscribe(&self, game_id: &str) -> broadcast::Receiver<GameEvent> {
        self.channels
            .entry(game_id.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    pub fn subscriber_count(&self, game_id: &str) -> usize {
        self.channels
            .get(game_id)
            .map_or(0, |sender| sender.receiver_count())
    }

    /// Drop channels whose subscribers have all gone away.
    pub fn prune(&self) -> usize {
        let before = self.channels.len();
        self.channels.retain(|_, sender| sender.receiver_count() > 0);
        before.saturating_sub(self.channels.len())
    }
}

#[async_trait]
impl EventNotifier for EventHub {
    async fn publish(&self, game_id: &str, event: GameEvent) -> Result<(), DomainError> {
        let delivered = match self.channels.get(game_id) {
            Some(sender) => sender.send(event).unwrap_or(0),
            None => 0,
        };
        if delivered == 0 {
            self.channels
                .remove_if(game_id, |_, sender| sender.receiver_count() == 0);
        }
        debug!(game_id, delivered, "Published game event in-process");
        Ok(())
    }
}
