//! Query freshness tracking for list fetches.
//!
//! Records themselves live in the UI store; this tracks when each query was
//! last fetched, whether a fetch is in flight and whether a mutation has
//! invalidated it.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::api::ResourceKind;

/// Identifies one list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub kind: ResourceKind,
    /// Information sheet the list is restricted to, if any.
    pub scope: Option<i64>,
}

impl QueryKey {
    pub fn all(kind: ResourceKind) -> Self {
        Self { kind, scope: None }
    }

    pub fn scoped(kind: ResourceKind, scope: Option<i64>) -> Self {
        Self { kind, scope }
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    fetched_at: Option<Instant>,
    invalidated: bool,
    in_flight: bool,
    failed: bool,
}

/// Freshness state of every query issued so far.
#[derive(Debug)]
pub struct QueryCache {
    stale_after: Duration,
    entries: HashMap<QueryKey, Entry>,
}

impl QueryCache {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            stale_after,
            entries: HashMap::new(),
        }
    }

    pub fn set_stale_after(&mut self, stale_after: Duration) {
        self.stale_after = stale_after;
    }

    /// A fetch is due when the query was never fetched, was invalidated or
    /// has gone stale, and none is already running. A failed query waits for
    /// an explicit invalidation.
    pub fn needs_fetch(&self, key: QueryKey, now: Instant) -> bool {
        match self.entries.get(&key) {
            None => true,
            Some(entry) if entry.in_flight => false,
            Some(entry) if entry.invalidated => true,
            Some(entry) if entry.failed => false,
            Some(entry) => entry
                .fetched_at
                .is_none_or(|at| now.saturating_duration_since(at) >= self.stale_after),
        }
    }

    pub fn is_fetching(&self, key: QueryKey) -> bool {
        self.entries.get(&key).is_some_and(|e| e.in_flight)
    }

    pub fn is_fetching_kind(&self, kind: ResourceKind) -> bool {
        self.entries.iter().any(|(k, e)| k.kind == kind && e.in_flight)
    }

    pub fn any_in_flight(&self) -> bool {
        self.entries.values().any(|e| e.in_flight)
    }

    pub fn mark_fetching(&mut self, key: QueryKey) {
        let entry = self.entries.entry(key).or_insert(Entry {
            fetched_at: None,
            invalidated: false,
            in_flight: false,
            failed: false,
        });
        entry.in_flight = true;
        entry.invalidated = false;
    }

    /// An invalidation that arrived mid-flight survives, so the result of a
    /// mutation racing the fetch is picked up by the next one.
    pub fn mark_fetched(&mut self, key: QueryKey, now: Instant) {
        let invalidated = self.entries.get(&key).is_some_and(|e| e.invalidated);
        self.entries.insert(
            key,
            Entry {
                fetched_at: Some(now),
                invalidated,
                in_flight: false,
                failed: false,
            },
        );
    }

    /// No automatic retry: the query stays failed until invalidated.
    pub fn mark_failed(&mut self, key: QueryKey) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.in_flight = false;
            entry.invalidated = false;
            entry.failed = true;
        }
    }

    pub fn has_failed(&self, key: QueryKey) -> bool {
        self.entries.get(&key).is_some_and(|e| e.failed)
    }

    /// Mark every query of `kind`, whatever its scope, for refetch.
    pub fn invalidate(&mut self, kind: ResourceKind) {
        for (key, entry) in self.entries.iter_mut() {
            if key.kind == kind {
                entry.invalidated = true;
            }
        }
    }

    pub fn invalidate_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.invalidated = true;
        }
    }

    /// Forget everything, e.g. after logout.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn last_fetched(&self, key: QueryKey) -> Option<Instant> {
        self.entries.get(&key).and_then(|e| e.fetched_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEETS: QueryKey = QueryKey {
        kind: ResourceKind::InformationSheets,
        scope: None,
    };

    #[test]
    fn test_unknown_query_needs_fetch() {
        let cache = QueryCache::new(Duration::from_secs(60));
        assert!(cache.needs_fetch(SHEETS, Instant::now()));
    }

    #[test]
    fn test_in_flight_query_is_not_refetched() {
        let mut cache = QueryCache::new(Duration::from_secs(60));
        cache.mark_fetching(SHEETS);
        assert!(!cache.needs_fetch(SHEETS, Instant::now()));
        assert!(cache.is_fetching(SHEETS));
        assert!(cache.is_fetching_kind(ResourceKind::InformationSheets));
        assert!(cache.any_in_flight());

        cache.mark_fetched(SHEETS, Instant::now());
        assert!(!cache.any_in_flight());
    }

    #[test]
    fn test_fresh_then_stale() {
        let mut cache = QueryCache::new(Duration::from_secs(60));
        let t0 = Instant::now();
        cache.mark_fetching(SHEETS);
        cache.mark_fetched(SHEETS, t0);

        assert!(!cache.needs_fetch(SHEETS, t0 + Duration::from_secs(59)));
        assert!(cache.needs_fetch(SHEETS, t0 + Duration::from_secs(60)));
    }

    #[test]
    fn test_invalidate_hits_every_scope_of_kind() {
        let mut cache = QueryCache::new(Duration::from_secs(600));
        let now = Instant::now();
        let scoped = QueryKey::scoped(ResourceKind::BankExperiences, Some(4));
        let all = QueryKey::all(ResourceKind::BankExperiences);

        cache.mark_fetched(scoped, now);
        cache.mark_fetched(all, now);
        cache.mark_fetched(SHEETS, now);

        cache.invalidate(ResourceKind::BankExperiences);

        assert!(cache.needs_fetch(scoped, now));
        assert!(cache.needs_fetch(all, now));
        assert!(!cache.needs_fetch(SHEETS, now));
    }

    #[test]
    fn test_refetch_clears_invalidation() {
        let mut cache = QueryCache::new(Duration::from_secs(600));
        let now = Instant::now();
        cache.mark_fetching(SHEETS);
        cache.mark_fetched(SHEETS, now);
        cache.invalidate_all();
        assert!(cache.needs_fetch(SHEETS, now));

        cache.mark_fetching(SHEETS);
        cache.mark_fetched(SHEETS, now);
        assert!(!cache.needs_fetch(SHEETS, now));
        assert_eq!(cache.last_fetched(SHEETS), Some(now));
    }

    #[test]
    fn test_invalidation_during_fetch_survives() {
        let mut cache = QueryCache::new(Duration::from_secs(600));
        let now = Instant::now();
        cache.mark_fetching(SHEETS);
        cache.invalidate(ResourceKind::InformationSheets);
        assert!(!cache.needs_fetch(SHEETS, now));

        cache.mark_fetched(SHEETS, now);
        assert!(cache.needs_fetch(SHEETS, now));
    }

    #[test]
    fn test_failed_fetch_waits_for_invalidation() {
        let mut cache = QueryCache::new(Duration::from_secs(600));
        cache.mark_fetching(SHEETS);
        cache.mark_failed(SHEETS);
        assert!(!cache.is_fetching(SHEETS));
        assert!(cache.has_failed(SHEETS));
        assert!(!cache.needs_fetch(SHEETS, Instant::now()));

        cache.invalidate(ResourceKind::InformationSheets);
        assert!(cache.needs_fetch(SHEETS, Instant::now()));
    }
}
