//! TTL cache with injectable clock
//!
//! An explicit memoization layer for derived projections: entries expire
//! after a configurable time-to-live and the cache holds at most `capacity`
//! entries, evicting the oldest insertion first. The clock is a trait so
//! staleness is unit-testable without touching wall time.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Source of "now" for expiry checks
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The real wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug)]
struct CacheEntry<V> {
    inserted_at: Instant,
    value: V,
}

/// A bounded map whose entries expire after a fixed TTL
#[derive(Debug)]
pub struct TtlCache<K, V, C = SystemClock>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    ttl: Duration,
    capacity: usize,
    clock: C,
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K, V> TtlCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
{
    /// Create a cache backed by the system clock
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self::with_clock(ttl, capacity, SystemClock)
    }
}

impl<K, V, C> TtlCache<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    /// Create a cache with an explicit clock (used by tests)
    pub fn with_clock(ttl: Duration, capacity: usize, clock: C) -> Self {
        Self {
            ttl,
            capacity: capacity.max(1),
            clock,
            entries: HashMap::new(),
        }
    }

    /// Look up a fresh entry; expired entries are removed and miss
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let now = self.clock.now();
        let expired = matches!(
            self.entries.get(key),
            Some(entry) if now.duration_since(entry.inserted_at) >= self.ttl
        );
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Insert a value, evicting the oldest entry when at capacity
    pub fn insert(&mut self, key: K, value: V) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.inserted_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(
            key,
            CacheEntry {
                inserted_at: self.clock.now(),
                value,
            },
        );
    }

    /// Drop one entry; returns whether it existed
    pub fn invalidate(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Access the clock (tests advance a manual clock through this)
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
