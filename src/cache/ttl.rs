use std::collections::HashMap;
use std::fmt::Display;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The full upstream app list
    AppList,
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::AppList => write!(f, "applist"),
        }
    }
}

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// In-memory cache with a single fixed time-to-live
///
/// Entries are only expired when they are read: a stale entry is removed on the
/// `get` that finds it, nothing sweeps the map in the background. There is no
/// capacity bound. The cache performs no locking of its own, so callers that
/// share it across tasks wrap it in a mutex.
pub struct TtlCache<V> {
    entries: HashMap<String, CacheEntry<V>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Retrieves a value from the cache by key
    ///
    /// Returns `None` when the key is missing or when the entry is at least
    /// `ttl` old, in which case the entry is evicted.
    pub fn get(&mut self, key: &CacheKey) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Stores a value, replacing any previous entry for the key
    pub fn set(&mut self, key: &CacheKey, value: V) {
        self.set_at(key, value, Instant::now());
    }

    pub(crate) fn get_at(&mut self, key: &CacheKey, now: Instant) -> Option<V> {
        let key = key.to_string();
        let entry = self.entries.get(&key)?;

        if now.saturating_duration_since(entry.stored_at) < self.ttl {
            return Some(entry.value.clone());
        }

        tracing::debug!(key = %key, ttl_secs = self.ttl.as_secs(), "Cache entry expired");
        self.entries.remove(&key);
        None
    }

    pub(crate) fn set_at(&mut self, key: &CacheKey, value: V, now: Instant) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
