// Single-slot TTL cache for the computed overview snapshot.
//
// The dashboard recomputes everything from the in-memory collection, so one
// slot keyed by the filter-shape hash is enough: a different query shape
// evicts the old value, and a whole-value swap keeps readers consistent.
// Clock instants are supplied by the caller, which makes expiry testable.
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

/// TTL of the overview statistics snapshot.
pub const STATS_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
struct Entry<T> {
    key: u64,
    stored_at: Instant,
    value: T,
}

#[derive(Debug, Clone)]
pub struct StatsCache<T> {
    slot: Option<Entry<T>>,
    ttl: Duration,
}

impl<T: Clone> StatsCache<T> {
    pub fn new(ttl: Duration) -> Self {
        StatsCache { slot: None, ttl }
    }

    pub fn with_default_ttl() -> Self {
        StatsCache::new(STATS_TTL)
    }

    /// Returns the cached value only when the key matches and the entry has
    /// not outlived the TTL at `now`.
    pub fn get(&self, key: u64, now: Instant) -> Option<T> {
        let entry = self.slot.as_ref()?;
        if entry.key != key {
            return None;
        }
        if now.duration_since(entry.stored_at) >= self.ttl {
            return None;
        }
        Some(entry.value.clone())
    }

    pub fn insert(&mut self, key: u64, value: T, now: Instant) {
        self.slot = Some(Entry {
            key,
            stored_at: now,
            value,
        });
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}

/// Hash any query shape into a cache key.
pub fn cache_key<T: Hash>(shape: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    shape.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DateRange;
    use chrono::NaiveDate;

    #[test]
    fn hit_within_ttl_miss_after() {
        let mut cache = StatsCache::new(Duration::from_secs(300));
        let t0 = Instant::now();
        cache.insert(1, "snapshot", t0);
        assert_eq!(cache.get(1, t0), Some("snapshot"));
        assert_eq!(cache.get(1, t0 + Duration::from_secs(299)), Some("snapshot"));
        assert_eq!(cache.get(1, t0 + Duration::from_secs(300)), None);
    }

    #[test]
    fn key_mismatch_misses_and_insert_evicts() {
        let mut cache = StatsCache::new(Duration::from_secs(300));
        let t0 = Instant::now();
        cache.insert(1, "a", t0);
        assert_eq!(cache.get(2, t0), None);
        cache.insert(2, "b", t0);
        assert_eq!(cache.get(1, t0), None);
        assert_eq!(cache.get(2, t0), Some("b"));
    }

    #[test]
    fn invalidate_clears_the_slot() {
        let mut cache = StatsCache::new(Duration::from_secs(300));
        let t0 = Instant::now();
        cache.insert(1, "a", t0);
        cache.invalidate();
        assert_eq!(cache.get(1, t0), None);
    }

    #[test]
    fn equal_shapes_hash_to_equal_keys() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 1);
        let a = DateRange { start: d, end: None };
        let b = DateRange { start: d, end: None };
        assert_eq!(cache_key(&a), cache_key(&b));
        let c = DateRange { start: None, end: d };
        assert_ne!(cache_key(&a), cache_key(&c));
    }
}
