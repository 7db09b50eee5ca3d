//! Generic key/value cache with per-entry expiry.
//!
//! Expired entries are dropped lazily on read and in bulk by [`ExpiringCache::sweep`].
//! An expired entry is never returned.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use time::OffsetDateTime;

use crate::clock::Clock;

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at: OffsetDateTime,
}

impl<V> Entry<V> {
    fn is_live(&self, now: OffsetDateTime) -> bool {
        now <= self.expires_at
    }
}

pub struct ExpiringCache<K, V> {
    entries: DashMap<K, Entry<V>>,
    clock: Arc<dyn Clock>,
}

impl<K, V> ExpiringCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Insert or replace `key`, live for `ttl` from now.
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        let expires_at = self.clock.now() + ttl;
        self.entries.insert(key, Entry { value, expires_at });
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        match self.entries.get(key) {
            Some(entry) if entry.is_live(now) => return Some(entry.value.clone()),
            Some(_) => {}
            None => return None,
        }
        // Read guard is released; re-check under the write lock before removing.
        self.entries.remove_if(key, |_, entry| !entry.is_live(now));
        None
    }

    /// Remove `key`, returning the value if it was still live.
    pub fn delete(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        self.entries
            .remove(key)
            .and_then(|(_, entry)| entry.is_live(now).then_some(entry.value))
    }

    /// Drop every expired entry and return how many were removed.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let live = entry.is_live(now);
            if !live {
                removed += 1;
            }
            live
        });
        removed
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries.iter().filter(|e| e.is_live(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
