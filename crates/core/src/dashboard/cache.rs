//! Dashboard summary caching using Moka.
//!
//! A summary is fully determined by the snapshot version, its rate table and
//! the two filters, so repeated renders of the same selection skip the
//! aggregation pass. Rates are part of the key because they can be edited
//! without bumping the snapshot version.

use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;

use monchantier_shared::config::CacheConfig;

use super::service::DashboardService;
use super::types::DashboardSummary;
use crate::currency::ExchangeRateTable;
use crate::error::AggregationResult;
use crate::filter::{CrossFilter, FilterCriteria};
use crate::records::DashboardSnapshot;

/// Default cache capacity (number of entries).
const DEFAULT_CACHE_CAPACITY: u64 = 100;

/// Default time-to-live for cache entries (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SummaryKey {
    version: u64,
    rates: ExchangeRateTable,
    primary: FilterCriteria,
    cross: CrossFilter,
}

/// Cache for dashboard summaries.
///
/// Thread-safe; clones share the same storage.
#[derive(Clone)]
pub struct DashboardCache {
    cache: Cache<SummaryKey, Arc<DashboardSummary>>,
}

impl DashboardCache {
    /// Creates a cache with default settings: 100 entries, 5 minute TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a cache with custom capacity and time-to-live.
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Creates a cache from the `[cache]` config section.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_config(config.max_capacity, config.ttl_secs)
    }

    /// Summarizes `snapshot`, returning a cached summary if available.
    ///
    /// A hit is returned with `cached: true` and is otherwise identical to a
    /// fresh pass. Failed passes are not cached.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`DashboardService::summarize`].
    pub fn summarize_cached(
        &self,
        snapshot: &DashboardSnapshot,
        primary: &FilterCriteria,
        cross: &CrossFilter,
    ) -> AggregationResult<DashboardSummary> {
        let key = SummaryKey {
            version: snapshot.version,
            rates: snapshot.rates.clone(),
            primary: primary.clone(),
            cross: cross.clone(),
        };

        if let Some(hit) = self.cache.get(&key) {
            let mut summary = (*hit).clone();
            summary.cached = true;
            return Ok(summary);
        }

        let summary = DashboardService::summarize(snapshot, primary, cross)?;
        self.cache.insert(key, Arc::new(summary.clone()));

        Ok(summary)
    }

    /// Invalidates all cached entries.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Returns the number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs pending eviction and expiry work.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for DashboardCache {
    fn default() -> Self {
        Self::new()
    }
}
