//! Projection service
//!
//! Computes cash projections from the current storage snapshot, memoized
//! behind a TTL cache. `recompute_now` is the explicit refresh entry point
//! invoked after mutating actions.

use std::time::Duration;

use chrono::NaiveDate;

use crate::error::FluxoResult;
use crate::projection::{
    CashProjection, Clock, EmptySeriesPolicy, ProjectionOptions, SystemClock, TtlCache,
};
use crate::storage::Storage;

/// Cache key: the injected "today" plus the options that shape the series
type ProjectionKey = (NaiveDate, u32, EmptySeriesPolicy);

/// Distinct (today, options) combinations kept at once
const CACHE_CAPACITY: usize = 8;

/// Service computing and caching cash projections
pub struct ProjectionService<C: Clock = SystemClock> {
    cache: TtlCache<ProjectionKey, CashProjection, C>,
}

impl ProjectionService<SystemClock> {
    /// Create a service whose cached projections expire after `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: TtlCache::new(ttl, CACHE_CAPACITY),
        }
    }
}

impl<C: Clock> ProjectionService<C> {
    /// Create a service with an explicit clock (used by tests)
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            cache: TtlCache::with_clock(ttl, CACHE_CAPACITY, clock),
        }
    }

    /// The projection for `today`, served from cache while fresh
    pub fn current(
        &mut self,
        storage: &Storage,
        today: NaiveDate,
        options: ProjectionOptions,
    ) -> FluxoResult<CashProjection> {
        let key = (today, options.horizon_days, options.empty_series);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit.clone());
        }

        let projection = compute(storage, today, options)?;
        self.cache.insert(key, projection.clone());
        Ok(projection)
    }

    /// Drop all cached projections and recompute from the latest snapshot
    ///
    /// Called after any mutating action (entry added/edited/deleted,
    /// payment processed or reversed).
    pub fn recompute_now(
        &mut self,
        storage: &Storage,
        today: NaiveDate,
        options: ProjectionOptions,
    ) -> FluxoResult<CashProjection> {
        self.cache.clear();
        let projection = compute(storage, today, options)?;
        self.cache
            .insert((today, options.horizon_days, options.empty_series), projection.clone());
        Ok(projection)
    }
}

fn compute(
    storage: &Storage,
    today: NaiveDate,
    options: ProjectionOptions,
) -> FluxoResult<CashProjection> {
    let store = storage.store_transactions.get_all()?;
    let household = storage.household_entries.get_all()?;
    Ok(CashProjection::compute(&store, &household, today, options))
}
