//! Runtime configuration loaded from environment variables.
//!
//! Every knob has a default; invalid values abort startup.
//!
//! | Variable | Default |
//! |---|---|
//! | `SPINFOUR_HOST` | `0.0.0.0` |
//! | `SPINFOUR_PORT` | `3001` |
//! | `SPINFOUR_BOARD_ROWS` | `6` |
//! | `SPINFOUR_BOARD_COLS` | `7` |
//! | `SPINFOUR_QUEUE_TTL_SECS` | `30` |
//! | `SPINFOUR_GAME_TTL_SECS` | `300` |
//! | `SPINFOUR_SWEEP_INTERVAL_SECS` | `300` |
//! | `REDIS_URL` | unset (in-process events) |

use std::str::FromStr;
use std::time::Duration;

use crate::domain::board::{DEFAULT_COLS, DEFAULT_ROWS};
use crate::store::StoreTtls;

/// Smallest board edge on which four in a row is possible in both orientations.
const MIN_BOARD_EDGE: usize = 4;
const MAX_BOARD_EDGE: usize = 32;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got {value:?}")]
    Parse {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    pub board_rows: usize,
    pub board_cols: usize,
    pub queue_ttl: Duration,
    pub game_ttl: Duration,
    pub sweep_interval: Duration,
}

impl GameSettings {
    pub fn store_ttls(&self) -> StoreTtls {
        StoreTtls {
            queue: self.queue_ttl,
            game: self.game_ttl,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server: ServerSettings,
    pub game: GameSettings,
    pub redis_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 3001,
            },
            game: GameSettings {
                board_rows: DEFAULT_ROWS,
                board_cols: DEFAULT_COLS,
                queue_ttl: Duration::from_secs(30),
                game_ttl: Duration::from_secs(300),
                sweep_interval: Duration::from_secs(300),
            },
            redis_url: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let settings = Self {
            server: ServerSettings {
                host: get("SPINFOUR_HOST").unwrap_or(defaults.server.host),
                port: parse_or(
                    get("SPINFOUR_PORT"),
                    "SPINFOUR_PORT",
                    "port",
                    defaults.server.port,
                )?,
            },
            game: GameSettings {
                board_rows: parse_or(
                    get("SPINFOUR_BOARD_ROWS"),
                    "SPINFOUR_BOARD_ROWS",
                    "row count",
                    defaults.game.board_rows,
                )?,
                board_cols: parse_or(
                    get("SPINFOUR_BOARD_COLS"),
                    "SPINFOUR_BOARD_COLS",
                    "column count",
                    defaults.game.board_cols,
                )?,
                queue_ttl: secs_or(
                    get("SPINFOUR_QUEUE_TTL_SECS"),
                    "SPINFOUR_QUEUE_TTL_SECS",
                    defaults.game.queue_ttl,
                )?,
                game_ttl: secs_or(
                    get("SPINFOUR_GAME_TTL_SECS"),
                    "SPINFOUR_GAME_TTL_SECS",
                    defaults.game.game_ttl,
                )?,
                sweep_interval: secs_or(
                    get("SPINFOUR_SWEEP_INTERVAL_SECS"),
                    "SPINFOUR_SWEEP_INTERVAL_SECS",
                    defaults.game.sweep_interval,
                )?,
            },
            redis_url: get("REDIS_URL"),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let game = &self.game;
        for (name, edge) in [
            ("SPINFOUR_BOARD_ROWS", game.board_rows),
            ("SPINFOUR_BOARD_COLS", game.board_cols),
        ] {
            if !(MIN_BOARD_EDGE..=MAX_BOARD_EDGE).contains(&edge) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be between {MIN_BOARD_EDGE} and {MAX_BOARD_EDGE}, got {edge}"
                )));
            }
        }
        for (name, ttl) in [
            ("SPINFOUR_QUEUE_TTL_SECS", game.queue_ttl),
            ("SPINFOUR_GAME_TTL_SECS", game.game_ttl),
            ("SPINFOUR_SWEEP_INTERVAL_SECS", game.sweep_interval),
        ] {
            if ttl.is_zero() {
                return Err(ConfigError::Validation(format!("{name} must be > 0")));
            }
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation("SPINFOUR_PORT must be > 0".into()));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}

fn parse_or<T: FromStr>(
    raw: Option<String>,
    var: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Parse {
            var,
            expected,
            value,
        }),
    }
}

fn secs_or(
    raw: Option<String>,
    var: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    parse_or(raw, var, "number of seconds", default.as_secs()).map(Duration::from_secs)
}
