use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::notification::RemovalCause;
use moka::sync::Cache as MokaCache;
use tracing::debug;

/// Lifetime of a cached upstream response
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Longest accepted lifetime; larger values are clamped
pub const MAX_CACHE_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Interval between sweeps of expired entries
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(120);

/// Build a normalized cache key: `<prefix>-<lowercased raw>`
pub fn cache_key(prefix: &str, raw: &str) -> String {
    format!("{}-{}", prefix, raw.to_lowercase())
}

/// In-memory key/value store whose entries expire after a fixed TTL.
///
/// Backed by moka. No size bound and no eviction other than expiry.
/// Clones share storage.
#[derive(Clone)]
pub struct TtlCache<V> {
    entries: MokaCache<String, V>,
    expired: Arc<AtomicUsize>,
    ttl: Duration,
}

impl<V> fmt::Debug for TtlCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache").field("ttl", &self.ttl).finish()
    }
}

impl<V: Clone + Send + Sync + 'static> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl<V: Clone + Send + Sync + 'static> TtlCache<V> {
    /// Create a new cache whose entries live for `ttl`, capped at `MAX_CACHE_TTL`
    pub fn new(ttl: Duration) -> Self {
        let ttl = ttl.min(MAX_CACHE_TTL);
        let expired = Arc::new(AtomicUsize::new(0));
        let counter = expired.clone();

        let entries = MokaCache::builder()
            .time_to_live(ttl)
            .eviction_listener(move |key: Arc<String>, _value: V, cause: RemovalCause| {
                if cause == RemovalCause::Expired {
                    debug!("Cache entry expired: {}", key);
                    counter.fetch_add(1, Ordering::Relaxed);
                }
            })
            .build();

        Self { entries, expired, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the stored value if present and not expired
    pub fn get(&self, key: &str) -> Option<V> {
        let value = self.entries.get(key);
        if value.is_some() {
            debug!("Cache hit: {}", key);
        } else {
            debug!("Cache miss: {}", key);
        }
        value
    }

    /// Store a value, replacing any previous entry for the key
    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), value);
    }

    /// Drop an entry, returning whether one was present
    pub fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evict expired entries, returning how many expired since the last call
    pub fn purge_expired(&self) -> usize {
        self.entries.run_pending_tasks();
        self.expired.swap(0, Ordering::Relaxed)
    }
}
