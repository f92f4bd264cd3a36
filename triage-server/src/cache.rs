//! Caching layer for facility wait times.
//!
//! Wait times change slowly, so estimates are memoized per facility and
//! hour of day. The cache key carries the date and hour, so a cached value
//! can never be served outside the hour it was computed for; the TTL only
//! bounds memory.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use futures::future::join_all;
use moka::future::Cache as MokaCache;

use crate::domain::Facility;
use crate::triage::{SyntheticWaitTimes, WaitEstimate, WaitTimeSource};

/// Cache key for wait times: (facility name, date, hour of day).
type WaitKey = (String, NaiveDate, u32);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct WaitCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for WaitCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Cache of wait-time estimates.
pub struct WaitTimeCache {
    waits: MokaCache<WaitKey, WaitEstimate>,
}

impl WaitTimeCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &WaitCacheConfig) -> Self {
        let waits = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { waits }
    }

    /// Wait time for a facility at the given local time.
    pub async fn wait_time(&self, name: &str, at: NaiveDateTime) -> WaitEstimate {
        let hour = at.hour();
        let key = (name.to_string(), at.date(), hour);

        self.waits
            .get_with(key, async { SyntheticWaitTimes::at_hour(hour).wait_time(name) })
            .await
    }

    /// Look up wait times for a set of facility names in one go.
    ///
    /// The returned snapshot can be handed to the synchronous triage
    /// pipeline.
    pub async fn snapshot<'a, I>(&self, names: I, at: NaiveDateTime) -> WaitSnapshot
    where
        I: IntoIterator<Item = &'a str>,
    {
        let lookups = names.into_iter().map(|name| async move {
            let wait = self.wait_time(name, at).await;
            (name.to_string(), wait)
        });
        let waits = join_all(lookups).await.into_iter().collect();

        WaitSnapshot {
            waits,
            fallback: SyntheticWaitTimes::at_hour(at.hour()),
        }
    }

    /// Snapshot of the given facilities for the current local time.
    pub async fn snapshot_now(&self, facilities: &[Facility]) -> WaitSnapshot {
        let names = facilities.iter().map(|f| f.name.as_str());
        self.snapshot(names, Local::now().naive_local()).await
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.waits.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.waits.invalidate_all();
    }

    /// Apply pending cache maintenance so `entry_count` is current.
    pub async fn run_pending_tasks(&self) {
        self.waits.run_pending_tasks().await;
    }
}

/// Wait times captured for one request.
#[derive(Debug, Clone)]
pub struct WaitSnapshot {
    waits: HashMap<String, WaitEstimate>,
    fallback: SyntheticWaitTimes,
}

impl WaitSnapshot {
    /// Number of facilities captured.
    pub fn len(&self) -> usize {
        self.waits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waits.is_empty()
    }
}

impl WaitTimeSource for WaitSnapshot {
    fn wait_time(&self, name: &str) -> WaitEstimate {
        self.waits
            .get(name)
            .copied()
            .unwrap_or_else(|| self.fallback.wait_time(name))
    }
}
