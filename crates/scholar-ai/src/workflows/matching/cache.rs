use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::domain::{MatchResult, ScholarshipId, StudentId};

/// Bounded, time-expiring store of prior matching results, keyed by student
/// and scholarship set. Matching only; rankings always run fresh.
///
/// Cached values are advisory: concurrent writers for the same key may race
/// and last-write-wins, since the authoritative copy lives in the
/// repository.
pub struct RecommendationCache {
    ttl: Duration,
    capacity: usize,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

struct CacheEntry {
    results: Vec<MatchResult>,
    inserted_at: Instant,
}

impl RecommendationCache {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);
    pub const DEFAULT_CAPACITY: usize = 100;

    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached results when a live entry exists; expired entries
    /// are evicted on the spot and report a miss.
    pub fn get(
        &self,
        student_id: &StudentId,
        scholarship_ids: &[ScholarshipId],
    ) -> Option<Vec<MatchResult>> {
        let key = cache_key(student_id, scholarship_ids);
        let mut entries = self.entries.lock().expect("cache mutex poisoned");

        match entries.get(&key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => Some(entry.results.clone()),
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    /// Overwrites any entry for the same key with a fresh timestamp. When
    /// the store grows past capacity, every expired entry is swept out;
    /// eviction is purely TTL-driven, never LRU.
    pub fn set(
        &self,
        student_id: &StudentId,
        scholarship_ids: &[ScholarshipId],
        results: Vec<MatchResult>,
    ) {
        let key = cache_key(student_id, scholarship_ids);
        let mut entries = self.entries.lock().expect("cache mutex poisoned");

        entries.insert(
            key,
            CacheEntry {
                results,
                inserted_at: Instant::now(),
            },
        );

        if entries.len() > self.capacity {
            let ttl = self.ttl;
            entries.retain(|_, entry| entry.inserted_at.elapsed() < ttl);
        }
    }

    /// Drops every entry. Called by collaborators when scholarship data
    /// changes in ways that would invalidate cached matches.
    pub fn clear(&self) {
        self.entries.lock().expect("cache mutex poisoned").clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RecommendationCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL, Self::DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for RecommendationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationCache")
            .field("ttl", &self.ttl)
            .field("capacity", &self.capacity)
            .field("entries", &self.len())
            .finish()
    }
}

/// Scholarship ids sort lexicographically before joining, so lookups hit
/// regardless of the order the caller supplies them in.
fn cache_key(student_id: &StudentId, scholarship_ids: &[ScholarshipId]) -> String {
    let mut ids: Vec<&str> = scholarship_ids.iter().map(|id| id.0.as_str()).collect();
    ids.sort_unstable();
    format!("{}:{}", student_id.0, ids.join(","))
}
