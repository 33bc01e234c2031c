//! Cache configuration.
//!
//! Controls the query cache via the `[cache]` section of `booktrack.toml`.

use std::time::Duration;

use serde::Deserialize;

const DEFAULT_QUERY_TTL_SECS: u64 = 300;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Query cache configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the read-through query cache.
    pub enabled: bool,
    /// Lifetime of every cached query result, in seconds.
    pub query_ttl_seconds: u64,
    /// Interval between purges of expired entries; zero disables the sweeper.
    pub sweep_interval_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            query_ttl_seconds: DEFAULT_QUERY_TTL_SECS,
            sweep_interval_seconds: DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            query_ttl_seconds: settings.query_ttl.as_secs(),
            sweep_interval_seconds: settings
                .sweep_interval
                .map(|interval| interval.as_secs())
                .unwrap_or(0),
        }
    }
}

impl CacheConfig {
    pub fn query_ttl(&self) -> Duration {
        Duration::from_secs(self.query_ttl_seconds)
    }

    /// Returns the sweep interval, or `None` when sweeping is disabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_seconds > 0).then(|| Duration::from_secs(self.sweep_interval_seconds))
    }
}
