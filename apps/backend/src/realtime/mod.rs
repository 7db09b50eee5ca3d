//! Realtime event delivery: payloads, the notifier seam and its adapters.

pub mod broker;
pub mod events;
pub mod hub;
pub mod notifier;

pub use broker::RedisPublisher;
pub use events::{channel, EventEnvelope, GameEvent};
pub use hub::EventHub;
pub use notifier::EventNotifier;
