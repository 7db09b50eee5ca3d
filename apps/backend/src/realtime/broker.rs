//! Redis `PUBLISH` adapter for multi-node delivery.
//!
//! Events are published as JSON [`EventEnvelope`]s on channel `game.{game_id}`.
//! Transient failures are retried a bounded number of times with exponential
//! backoff; the request path never waits longer than a few hundred milliseconds.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{info, warn};

use super::events::{channel, EventEnvelope, GameEvent};
use super::notifier::EventNotifier;
use crate::error::AppError;
use crate::errors::domain::{DependencyKind, DomainError};

const PUBLISHER_MAX_ATTEMPTS: u32 = 3;
const PUBLISHER_INITIAL_RETRY_DELAY_MS: u64 = 50;
const PUBLISHER_MAX_RETRY_DELAY_MS: u64 = 200;

pub struct RedisPublisher {
    publisher: Mutex<ConnectionManager>,
}

impl RedisPublisher {
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        let client = Client::open(redis_url)
            .map_err(|err| AppError::config(format!("Invalid REDIS_URL: {err}")))?;

        let manager = ConnectionManager::new(client).await.map_err(|err| {
            AppError::config(format!("Unable to initialize Redis connection manager: {err}"))
        })?;

        info!("Redis event publisher connected");
        Ok(Self {
            publisher: Mutex::new(manager),
        })
    }
}

#[async_trait]
impl EventNotifier for RedisPublisher {
    async fn publish(&self, game_id: &str, event: GameEvent) -> Result<(), DomainError> {
        let envelope = EventEnvelope {
            game_id: game_id.to_string(),
            event,
        };
        let encoded = serde_json::to_string(&envelope).map_err(|err| {
            DomainError::transient(
                DependencyKind::Notifier,
                format!("Failed to serialize realtime envelope: {err}"),
            )
        })?;
        let channel = channel(game_id);

        let mut attempt = 0u32;
        loop {
            attempt += 1;

            let publish_res = {
                let mut publisher = self.publisher.lock().await;
                publisher
                    .publish::<_, _, ()>(channel.clone(), encoded.clone())
                    .await
            };

            match publish_res {
                Ok(()) => return Ok(()),
                Err(err) => {
                    let message = err.to_string();
                    if attempt >= PUBLISHER_MAX_ATTEMPTS || !is_transient_error(&message) {
                        return Err(DomainError::transient(
                            DependencyKind::Notifier,
                            format!("Failed to publish realtime event to Redis: {message}"),
                        ));
                    }

                    let delay_ms = retry_delay_ms(attempt);
                    warn!(
                        error = %message,
                        attempt,
                        retry_delay_ms = delay_ms,
                        "Redis publish failed, retrying"
                    );
                    sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}

fn retry_delay_ms(attempt: u32) -> u64 {
    PUBLISHER_INITIAL_RETRY_DELAY_MS
        .saturating_mul(2_u64.saturating_pow(attempt.saturating_sub(1)))
        .min(PUBLISHER_MAX_RETRY_DELAY_MS)
}

fn is_transient_error(message: &str) -> bool {
    let error_msg = message.to_lowercase();

    if error_msg.contains("authentication failed")
        || error_msg.contains("invalid redis_url")
        || error_msg.contains("unsupported")
        || error_msg.contains("noperm")
    {
        return false;
    }

    error_msg.contains("connection refused")
        || error_msg.contains("connection reset")
        || error_msg.contains("connection aborted")
        || error_msg.contains("timed out")
        || error_msg.contains("timeout")
        || error_msg.contains("broken pipe")
        || error_msg.contains("network")
        || error_msg.contains("io error")
        || error_msg.contains("stream ended")
}
