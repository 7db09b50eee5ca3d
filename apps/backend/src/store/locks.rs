//! Per-key async mutexes.

use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One `tokio::sync::Mutex` per key, created on first use.
///
/// Guards are owned so they can be held across awaits and moved between
/// helpers. Idle mutexes are reclaimed by [`KeyedLocks::prune`].
pub struct KeyedLocks<K> {
    locks: DashMap<K, Arc<Mutex<()>>>,
}

impl<K> KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    pub async fn lock(&self, key: &K) -> OwnedMutexGuard<()> {
        let mutex = self.locks.entry(key.clone()).or_default().value().clone();
        mutex.lock_owned().await
    }

    /// Drop mutexes nobody holds or waits on. Returns how many were removed.
    pub fn prune(&self) -> usize {
        let before = self.locks.len();
        self.locks.retain(|_, mutex| Arc::strong_count(mutex) > 1);
        before.saturating_sub(self.locks.len())
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl<K> Default for KeyedLocks<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
