//! Layout caching.
//!
//! The pipeline is deterministic in its input points, so a finished layout
//! can be keyed by a hash of the input alone and reused across runs. Storage
//! is injected by the caller; the crate ships an in-memory implementation
//! and tests substitute their own.

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};

use crate::model::{Landfall, PlacedCluster};

/// Content hash of a layout request.
///
/// Derived from the input points and the display limit, in order. Two
/// requests with the same key produce the same layout under the same
/// parameters; callers that vary parameters between runs should not share a
/// cache across them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentKey(u64);

impl ContentKey {
    pub fn of(points: &[Landfall], limit: Option<usize>) -> Self {
        let mut hasher = FxHasher::default();
        for point in points {
            hasher.write_u64(point.longitude.to_bits());
            hasher.write_u64(point.latitude.to_bits());
            hasher.write_u8(point.category);
            point.name.as_str().hash(&mut hasher);
            hasher.write_i32(point.year);
        }
        limit.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Pluggable storage for finished layouts.
pub trait PlacementCache {
    fn get(&self, key: ContentKey) -> Option<Vec<PlacedCluster>>;
    fn put(&mut self, key: ContentKey, layout: &[PlacedCluster]);
}

/// Process-local cache backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: FxHashMap<ContentKey, Vec<PlacedCluster>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PlacementCache for MemoryCache {
    fn get(&self, key: ContentKey) -> Option<Vec<PlacedCluster>> {
        self.entries.get(&key).cloned()
    }

    fn put(&mut self, key: ContentKey, layout: &[PlacedCluster]) {
        self.entries.insert(key, layout.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<Landfall> {
        vec![
            Landfall::new(-80.0, 25.0, 4, "ANDREW", 1992),
            Landfall::new(-82.0, 26.5, 3, "CHARLEY", 2004),
        ]
    }

    #[test]
    fn key_is_stable_for_identical_input() {
        assert_eq!(
            ContentKey::of(&points(), None),
            ContentKey::of(&points(), None)
        );
    }

    #[test]
    fn key_changes_with_input() {
        let base = ContentKey::of(&points(), None);

        let mut moved = points();
        moved[0].longitude += 0.001;
        assert_ne!(ContentKey::of(&moved, None), base);

        let mut renamed = points();
        renamed[1].name = "CHARLIE".into();
        assert_ne!(ContentKey::of(&renamed, None), base);

        assert_ne!(ContentKey::of(&points(), Some(1)), base);
    }

    #[test]
    fn key_depends_on_point_order() {
        let mut reversed = points();
        reversed.reverse();
        assert_ne!(
            ContentKey::of(&reversed, None),
            ContentKey::of(&points(), None)
        );
    }

    #[test]
    fn memory_cache_round_trips() {
        let mut cache = MemoryCache::new();
        let key = ContentKey::of(&points(), None);
        assert!(cache.get(key).is_none());

        cache.put(key, &[]);
        assert_eq!(cache.get(key), Some(Vec::new()));
        assert_eq!(cache.len(), 1);
    }
}
