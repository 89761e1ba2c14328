//! Caching layer for shortest-path trees.
//!
//! A single Dijkstra run answers every query sharing its origin, so the
//! search caches whole trees keyed by origin stop. The graph never changes
//! after build, so entries never go stale and need no TTL.

use std::sync::Arc;

use moka::sync::Cache as MokaCache;

use crate::domain::StopId;

use super::config::CacheConfig;
use super::search::ShortestPathTree;

/// Cached tree entry.
type TreeEntry = Arc<ShortestPathTree>;

/// Cache of shortest-path trees keyed by origin.
pub struct RouteCache {
    trees: MokaCache<StopId, TreeEntry>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let trees = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .build();

        Self { trees }
    }

    /// Get a cached tree.
    pub fn get(&self, origin: &StopId) -> Option<TreeEntry> {
        self.trees.get(origin)
    }

    /// Get a cached tree, computing and inserting it on a miss.
    pub fn get_with(&self, origin: StopId, compute: impl FnOnce() -> ShortestPathTree) -> TreeEntry {
        self.trees.get_with(origin, || Arc::new(compute()))
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.trees.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_once_per_origin() {
        let cache = RouteCache::new(&CacheConfig::default());
        let mut computed = 0;

        let first = cache.get_with(StopId(0), || {
            computed += 1;
            ShortestPathTree::unreached(StopId(0), 2)
        });
        let second = cache.get_with(StopId(0), || {
            computed += 1;
            ShortestPathTree::unreached(StopId(0), 2)
        });

        assert_eq!(computed, 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn miss_then_hit() {
        let cache = RouteCache::new(&CacheConfig::default());
        assert!(cache.get(&StopId(1)).is_none());

        cache.get_with(StopId(1), || ShortestPathTree::unreached(StopId(1), 2));
        assert!(cache.get(&StopId(1)).is_some());
        assert!(cache.get(&StopId(2)).is_none());
    }
}
