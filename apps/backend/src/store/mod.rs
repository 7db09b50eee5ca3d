//! Session store: expiring caches and per-game locks.

pub mod cache;
pub mod locks;
pub mod session;

pub use cache::ExpiringCache;
pub use locks::KeyedLocks;
pub use session::{SessionStore, StoreTtls, SweepReport, WAITING_PLAYERS_KEY};
