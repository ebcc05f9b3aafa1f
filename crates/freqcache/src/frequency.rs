//! Frequency buckets for O(1) LFU victim selection
//!
//! Maps an access count to the set of keys currently at that count and
//! tracks the smallest non-empty count.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use ahash::RandomState;

type Bucket<K> = HashSet<K, RandomState>;

/// Keys grouped by access frequency
pub(crate) struct FrequencyIndex<K> {
    buckets: HashMap<u64, Bucket<K>, RandomState>,
    min_frequency: u64,
}

impl<K> FrequencyIndex<K>
where
    K: Hash + Eq + Clone,
{
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            min_frequency: 0,
        }
    }

    /// Smallest frequency with at least one key (meaningless when empty)
    pub(crate) fn min_frequency(&self) -> u64 {
        self.min_frequency
    }

    /// Place a brand new key in bucket 0, which becomes the minimum
    pub(crate) fn insert_new(&mut self, key: K) {
        self.buckets
            .entry(0)
            .or_insert_with(|| HashSet::with_hasher(RandomState::new()))
            .insert(key);
        self.min_frequency = 0;
    }

    /// Move `key` from bucket `frequency` to `frequency + 1`
    ///
    /// Returns the new frequency.
    pub(crate) fn bump(&mut self, key: &K, frequency: u64) -> u64 {
        let next = frequency + 1;

        let owned = self.detach(key, frequency);
        if owned.emptied_min {
            // Nothing can sit below the bucket we were just in.
            self.min_frequency = next;
        }

        self.buckets
            .entry(next)
            .or_insert_with(|| HashSet::with_hasher(RandomState::new()))
            .insert(owned.key.unwrap_or_else(|| key.clone()));

        next
    }

    /// Drop `key` from bucket `frequency`
    ///
    /// Returns true if this emptied the minimum bucket, in which case the
    /// caller must [`recompute_min`](Self::recompute_min).
    pub(crate) fn remove(&mut self, key: &K, frequency: u64) -> bool {
        self.detach(key, frequency).emptied_min
    }

    /// Any key from the minimum bucket; iteration order decides which
    pub(crate) fn victim(&self) -> Option<&K> {
        self.buckets
            .get(&self.min_frequency)
            .and_then(|bucket| bucket.iter().next())
    }

    /// Full scan over bucket indices
    pub(crate) fn recompute_min(&mut self) {
        self.min_frequency = self.buckets.keys().copied().min().unwrap_or(0);
    }

    /// Number of non-empty buckets
    #[cfg(test)]
    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Whether `key` sits in bucket `frequency`
    #[cfg(test)]
    pub(crate) fn contains(&self, key: &K, frequency: u64) -> bool {
        self.buckets
            .get(&frequency)
            .is_some_and(|bucket| bucket.contains(key))
    }

    /// Total keys across all buckets
    #[cfg(test)]
    pub(crate) fn key_count(&self) -> usize {
        self.buckets.values().map(|bucket| bucket.len()).sum()
    }

    pub(crate) fn clear(&mut self) {
        self.buckets.clear();
        self.min_frequency = 0;
    }

    fn detach(&mut self, key: &K, frequency: u64) -> Detached<K> {
        let Some(bucket) = self.buckets.get_mut(&frequency) else {
            return Detached {
                key: None,
                emptied_min: false,
            };
        };

        let key = bucket.take(key);
        let emptied = bucket.is_empty();
        if emptied {
            self.buckets.remove(&frequency);
        }

        Detached {
            key,
            emptied_min: emptied && frequency == self.min_frequency,
        }
    }
}

/// Result of pulling a key out of its bucket
struct Detached<K> {
    key: Option<K>,
    emptied_min: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_then_bump() {
        let mut index = FrequencyIndex::with_capacity(4);

        index.insert_new("a");
        assert_eq!(index.min_frequency(), 0);
        assert!(index.contains(&"a", 0));

        assert_eq!(index.bump(&"a", 0), 1);
        assert_eq!(index.min_frequency(), 1);
        assert!(!index.contains(&"a", 0));
        assert!(index.contains(&"a", 1));
        assert_eq!(index.bucket_count(), 1);
    }

    #[test]
    fn test_bump_keeps_min_when_bucket_not_empty() {
        let mut index = FrequencyIndex::with_capacity(4);

        index.insert_new("a");
        index.bump(&"a", 0);
        index.insert_new("b");
        index.bump(&"b", 0);

        // a: 1 -> 2, b still at 1
        index.bump(&"a", 1);
        assert_eq!(index.min_frequency(), 1);
        assert_eq!(index.victim(), Some(&"b"));
    }

    #[test]
    fn test_remove_reports_min_bucket_emptied() {
        let mut index = FrequencyIndex::with_capacity(4);

        index.insert_new("a");
        index.bump(&"a", 0);
        index.insert_new("b");
        index.bump(&"b", 0);
        index.bump(&"b", 1);

        assert!(index.remove(&"a", 1));
        index.recompute_min();
        assert_eq!(index.min_frequency(), 2);

        assert!(index.remove(&"b", 2));
        index.recompute_min();
        assert_eq!(index.bucket_count(), 0);
        assert_eq!(index.key_count(), 0);
        assert_eq!(index.victim(), None);
    }

    #[test]
    fn test_remove_non_min_bucket() {
        let mut index = FrequencyIndex::with_capacity(4);

        index.insert_new("a");
        index.bump(&"a", 0);
        index.insert_new("b");
        index.bump(&"b", 0);
        index.bump(&"b", 1);

        assert!(!index.remove(&"b", 2));
        assert_eq!(index.min_frequency(), 1);
    }
}
