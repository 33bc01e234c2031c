//! Query cache storage.
//!
//! A flat, process-wide key/value map where every entry carries its own
//! expiry instant. Expired entries are invisible to readers; they are either
//! overwritten by the next `set` or dropped by `purge_expired`.

use std::time::Duration;

use dashmap::DashMap;
use metrics::counter;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::domain::entities::{BookRecord, ReadBookRecord, ToBeReadBookRecord};

use super::config::CacheConfig;

const METRIC_CACHE_HIT: &str = "booktrack_cache_hit_total";
const METRIC_CACHE_MISS: &str = "booktrack_cache_miss_total";
const METRIC_CACHE_EXPIRED: &str = "booktrack_cache_expired_total";
const METRIC_CACHE_PURGED: &str = "booktrack_cache_purged_total";

/// A cached query result.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Book(BookRecord),
    Books(Vec<BookRecord>),
    ReadBook(ReadBookRecord),
    ReadBooks(Vec<ReadBookRecord>),
    ToBeReadBooks(Vec<ToBeReadBookRecord>),
}

/// Conversion between a query result type and its cached representation.
pub trait Cacheable: Clone + Sized {
    fn into_cached(self) -> CachedValue;

    /// Returns `None` when the cached value holds a different result type.
    fn from_cached(value: CachedValue) -> Option<Self>;
}

impl Cacheable for BookRecord {
    fn into_cached(self) -> CachedValue {
        CachedValue::Book(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Book(book) => Some(book),
            _ => None,
        }
    }
}

impl Cacheable for Vec<BookRecord> {
    fn into_cached(self) -> CachedValue {
        CachedValue::Books(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Books(books) => Some(books),
            _ => None,
        }
    }
}

impl Cacheable for ReadBookRecord {
    fn into_cached(self) -> CachedValue {
        CachedValue::ReadBook(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::ReadBook(read_book) => Some(read_book),
            _ => None,
        }
    }
}

impl Cacheable for Vec<ReadBookRecord> {
    fn into_cached(self) -> CachedValue {
        CachedValue::ReadBooks(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::ReadBooks(read_books) => Some(read_books),
            _ => None,
        }
    }
}

impl Cacheable for Vec<ToBeReadBookRecord> {
    fn into_cached(self) -> CachedValue {
        CachedValue::ToBeReadBooks(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::ToBeReadBooks(queued) => Some(queued),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: CachedValue,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Read-through query cache with per-entry TTL.
///
/// Safe for concurrent `get`/`set` from any number of tasks; the last `set`
/// for a key wins. No lock is held across an await point.
#[derive(Debug)]
pub struct QueryCache {
    config: CacheConfig,
    entries: DashMap<String, CacheEntry>,
}

impl QueryCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: DashMap::new(),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// TTL applied to every query result.
    pub fn ttl(&self) -> Duration {
        self.config.query_ttl()
    }

    pub fn get(&self, key: &str) -> Option<CachedValue> {
        if !self.config.enabled {
            return None;
        }

        let now = Instant::now();
        match self.entries.get(key) {
            Some(entry) if entry.is_live(now) => {
                counter!(METRIC_CACHE_HIT).increment(1);
                debug!(target = "booktrack::cache", key, "cache hit");
                Some(entry.value.clone())
            }
            Some(_) => {
                counter!(METRIC_CACHE_EXPIRED).increment(1);
                counter!(METRIC_CACHE_MISS).increment(1);
                debug!(target = "booktrack::cache", key, "cache entry expired");
                None
            }
            None => {
                counter!(METRIC_CACHE_MISS).increment(1);
                debug!(target = "booktrack::cache", key, "cache miss");
                None
            }
        }
    }

    pub fn set(&self, key: impl Into<String>, value: CachedValue, ttl: Duration) {
        if !self.config.enabled {
            return;
        }

        let key = key.into();
        let Some(expires_at) = Instant::now().checked_add(ttl) else {
            warn!(
                target = "booktrack::cache",
                key = %key,
                ttl_secs = ttl.as_secs(),
                "ttl overflows the clock; entry not cached"
            );
            return;
        };
        self.entries.insert(key, CacheEntry { value, expires_at });
    }

    /// Typed lookup; a value of another result type counts as absent.
    pub fn get_as<T: Cacheable>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(T::from_cached)
    }

    pub fn set_as<T: Cacheable>(&self, key: impl Into<String>, value: T, ttl: Duration) {
        self.set(key, value.into_cached(), ttl);
    }

    /// Drop every expired entry and return how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live(now));
        let purged = before.saturating_sub(self.entries.len());
        if purged > 0 {
            counter!(METRIC_CACHE_PURGED).increment(purged as u64);
            debug!(target = "booktrack::cache", purged, "purged expired entries");
        }
        purged
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
