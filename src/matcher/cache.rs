use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use hashbrown::HashMap as FastHashMap;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use crate::pattern::{CompileOptions, PatternResult, RoutePath};

use super::compiled::CompiledMatcher;

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Bounded LRU of compiled matchers keyed by pattern text. Concurrent first
/// access to one key compiles at most once; later callers share the same
/// `Arc`.
#[derive(Debug)]
pub struct MatcherCache {
    inner: RwLock<CacheInner>,
    stats: CacheStats,
}

#[derive(Debug)]
struct CacheInner {
    capacity: usize,
    map: FastHashMap<String, Arc<CompiledMatcher>>,
    order: VecDeque<String>,
}

impl MatcherCache {
    pub fn new(capacity: usize) -> Self {
        let cap = capacity.max(1);
        Self {
            inner: RwLock::new(CacheInner {
                capacity: cap,
                map: FastHashMap::with_capacity(cap),
                order: VecDeque::with_capacity(cap),
            }),
            stats: CacheStats::default(),
        }
    }

    /// Returns the compiled matcher for `pattern`, compiling on first access.
    /// Compilation happens under the write lock, so a key is never compiled
    /// twice and readers never observe a torn value.
    pub fn get_or_compile(
        &self,
        pattern: &str,
        options: &CompileOptions,
    ) -> PatternResult<Arc<CompiledMatcher>> {
        let guard = self.inner.upgradable_read();

        if let Some(hit) = guard.map.get(pattern).cloned() {
            self.stats.record_hit();
            tracing::event!(tracing::Level::TRACE, pattern = %pattern, "matcher cache hit");

            let mut guard = RwLockUpgradableReadGuard::upgrade(guard);
            guard.promote(pattern);
            return Ok(hit);
        }

        self.stats.record_miss();
        tracing::event!(tracing::Level::TRACE, pattern = %pattern, "matcher cache miss");

        let mut guard = RwLockUpgradableReadGuard::upgrade(guard);
        let matcher = Arc::new(CompiledMatcher::new(RoutePath::from(pattern), options)?);
        guard.insert(pattern.to_string(), matcher.clone());

        Ok(matcher)
    }

    pub fn len(&self) -> usize {
        self.inner.read().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().map.is_empty()
    }

    /// `(hits, misses)` counters since construction.
    pub fn metrics(&self) -> (u64, u64) {
        self.stats.snapshot()
    }
}

impl Default for MatcherCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl CacheInner {
    fn insert(&mut self, pattern: String, matcher: Arc<CompiledMatcher>) {
        if self.order.len() == self.capacity
            && let Some(oldest) = self.order.pop_back()
        {
            self.map.remove(&oldest);
        }

        self.order.push_front(pattern.clone());
        self.map.insert(pattern, matcher);
    }

    fn promote(&mut self, pattern: &str) {
        if let Some(pos) = self.order.iter().position(|existing| existing == pattern) {
            self.order.remove(pos);
        }
        self.order.push_front(pattern.to_string());
    }
}

#[derive(Debug, Default)]
struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheStats {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_access_shares_one_compiled_value() {
        let cache = MatcherCache::new(4);
        let options = CompileOptions::default();

        let first = cache.get_or_compile("/users/:id", &options).unwrap();
        let second = cache.get_or_compile("/users/:id", &options).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.metrics(), (1, 1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn evicts_least_recently_used_entry() {
        let cache = MatcherCache::new(2);
        let options = CompileOptions::default();

        cache.get_or_compile("/a", &options).unwrap();
        cache.get_or_compile("/b", &options).unwrap();
        // Touch "/a" so "/b" becomes the eviction candidate.
        cache.get_or_compile("/a", &options).unwrap();
        cache.get_or_compile("/c", &options).unwrap();

        assert_eq!(cache.len(), 2);
        let (hits, misses) = cache.metrics();
        assert_eq!((hits, misses), (1, 3));

        // "/b" was evicted, so fetching it compiles again.
        cache.get_or_compile("/b", &options).unwrap();
        assert_eq!(cache.metrics(), (1, 4));
    }

    #[test]
    fn compile_failures_are_not_cached() {
        let cache = MatcherCache::new(4);
        let options = CompileOptions::default();

        assert!(cache.get_or_compile("/a((b)", &options).is_err());
        assert!(cache.is_empty());
    }
}
