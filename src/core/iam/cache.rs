//! LRU cache for policy evaluation results
//!
//! Entries are only valid for one policy-set generation. Moving the cache to a
//! newer generation drops everything it holds.

use super::Decision;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Cache key for policy evaluation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    principal: String,
    action: String,
    resource: String,
}

impl CacheKey {
    fn new(principal: &str, action: &str, resource: &str) -> Self {
        CacheKey {
            principal: principal.to_string(),
            action: action.to_string(),
            resource: resource.to_string(),
        }
    }
}

/// LRU cache for policy evaluation results
pub struct PolicyCache {
    generation: u64,
    cache: LruCache<CacheKey, Decision>,
}

impl PolicyCache {
    /// Create a new policy cache with given capacity
    pub fn new(capacity: NonZeroUsize) -> Self {
        PolicyCache {
            generation: 0,
            cache: LruCache::new(capacity),
        }
    }

    /// Generation the cached entries were computed against
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Align the cache with `generation`
    ///
    /// Returns false when `generation` is older than the cache, in which case the
    /// caller must neither read nor write entries.
    pub fn sync(&mut self, generation: u64) -> bool {
        if generation > self.generation {
            self.cache.clear();
            self.generation = generation;
        }
        generation == self.generation
    }

    /// Get cached evaluation result
    pub fn get(&mut self, principal: &str, action: &str, resource: &str) -> Option<Decision> {
        self.cache
            .get(&CacheKey::new(principal, action, resource))
            .copied()
    }

    /// Put evaluation result in cache
    pub fn put(&mut self, principal: &str, action: &str, resource: &str, decision: Decision) {
        self.cache
            .put(CacheKey::new(principal, action, resource), decision);
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize) -> PolicyCache {
        PolicyCache::new(NonZeroUsize::new(capacity).unwrap())
    }

    #[test]
    fn test_cache_basic() {
        let mut cache = cache(10);

        assert!(cache.get("user1", "read", "/test").is_none());

        cache.put("user1", "read", "/test", Decision::Allow);
        assert_eq!(cache.get("user1", "read", "/test"), Some(Decision::Allow));

        cache.put("user1", "write", "/test", Decision::ExplicitDeny);
        assert_eq!(
            cache.get("user1", "write", "/test"),
            Some(Decision::ExplicitDeny)
        );
    }

    #[test]
    fn test_cache_lru_eviction() {
        let mut cache = cache(2);

        cache.put("user1", "read", "/a", Decision::Allow);
        cache.put("user1", "read", "/b", Decision::Allow);
        cache.put("user1", "read", "/c", Decision::Allow); // Should evict /a

        assert!(cache.get("user1", "read", "/a").is_none());
        assert_eq!(cache.get("user1", "read", "/b"), Some(Decision::Allow));
        assert_eq!(cache.get("user1", "read", "/c"), Some(Decision::Allow));
    }

    #[test]
    fn test_cache_keys_include_principal() {
        let mut cache = cache(10);

        cache.put("user1", "read", "/test", Decision::Allow);
        cache.put("user2", "read", "/test", Decision::ImplicitDeny);

        assert_eq!(cache.get("user1", "read", "/test"), Some(Decision::Allow));
        assert_eq!(
            cache.get("user2", "read", "/test"),
            Some(Decision::ImplicitDeny)
        );
    }

    #[test]
    fn test_sync_newer_generation_clears() {
        let mut cache = cache(10);
        assert!(cache.sync(1));
        cache.put("user1", "read", "/test", Decision::Allow);

        assert!(cache.sync(1));
        assert_eq!(cache.len(), 1);

        assert!(cache.sync(2));
        assert!(cache.is_empty());
        assert_eq!(cache.generation(), 2);
    }

    #[test]
    fn test_sync_older_generation_is_rejected() {
        let mut cache = cache(10);
        assert!(cache.sync(5));
        cache.put("user1", "read", "/test", Decision::Allow);

        assert!(!cache.sync(4));
        assert_eq!(cache.generation(), 5);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = cache(10);

        cache.put("user1", "read", "/test", Decision::Allow);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
    }
}
