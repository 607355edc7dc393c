//! Generic read-through TTL map.
//!
//! Expiry is lazy: an entry whose deadline has passed reads as a miss but
//! stays in memory until [`TtlCache::sweep_at`] runs.
//!
//! Time is injected via `_at` suffixed methods for deterministic testing.
//! Production callers use the convenience methods without the `_at` suffix,
//! which read `tokio::time::Instant::now()` (and therefore honor a paused
//! test clock).

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;
use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    /// `None` when `now + ttl` is not representable: the entry never expires.
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    /// Live strictly before the deadline; at `expires_at` the entry is gone.
    fn is_live_at(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| now < deadline)
    }
}

/// Thread-safe map whose entries expire a fixed duration after their last write.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    default_ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_at(key, Instant::now())
    }

    /// Look up a live entry. Expired entries read as a miss.
    pub fn get_at<Q>(&self, key: &Q, now: Instant) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entries = self.entries.read().expect("ttl cache lock poisoned");
        entries
            .get(key)
            .filter(|entry| entry.is_live_at(now))
            .map(|entry| entry.value.clone())
    }

    pub fn contains_live_at<Q>(&self, key: &Q, now: Instant) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entries = self.entries.read().expect("ttl cache lock poisoned");
        entries.get(key).is_some_and(|entry| entry.is_live_at(now))
    }

    /// Deadline of a live entry, for observability. `None` if the key is
    /// absent, expired, or never expires.
    pub fn expires_at<Q>(&self, key: &Q, now: Instant) -> Option<Instant>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entries = self.entries.read().expect("ttl cache lock poisoned");
        entries
            .get(key)
            .filter(|entry| entry.is_live_at(now))
            .and_then(|entry| entry.expires_at)
    }

    /// Insert or overwrite with the default TTL. Overwriting restarts the TTL.
    pub fn set_default(&self, key: K, value: V) {
        self.set_at(key, value, self.default_ttl, Instant::now());
    }

    pub fn set_default_at(&self, key: K, value: V, now: Instant) {
        self.set_at(key, value, self.default_ttl, now);
    }

    pub fn set_at(&self, key: K, value: V, ttl: Duration, now: Instant) {
        let mut entries = self.entries.write().expect("ttl cache lock poisoned");
        entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: now.checked_add(ttl),
            },
        );
    }

    /// Drop every entry that is expired at `now`. Returns how many were removed.
    pub fn sweep_at(&self, now: Instant) -> usize {
        let mut entries = self.entries.write().expect("ttl cache lock poisoned");
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live_at(now));
        before - entries.len()
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.read().expect("ttl cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
