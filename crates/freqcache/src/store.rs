//! LFU store: entries plus frequency index, kept consistent
//!
//! Not synchronized. [`LfuCache`](crate::LfuCache) wraps it in a mutex.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};
use ahash::RandomState;
use tracing::{trace, warn};

use crate::entry::CacheEntry;
use crate::error::{Error, Result};
use crate::frequency::FrequencyIndex;

/// What a `set` call did to the store
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SetOutcome<K> {
    /// Capacity is zero
    Ignored,
    /// Key existed; value and expiration replaced
    Overwritten,
    /// Key was new, possibly after evicting another one
    Inserted { evicted: Option<K> },
}

/// Bounded key/value store with LFU eviction and per-entry expiration
pub(crate) struct LfuStore<K, V> {
    entries: HashMap<K, CacheEntry<V>, RandomState>,
    index: FrequencyIndex<K>,
    capacity: usize,
    default_ttl: Duration,
}

impl<K, V> LfuStore<K, V>
where
    K: Hash + Eq + Clone,
{
    pub(crate) fn new(capacity: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            index: FrequencyIndex::with_capacity(capacity),
            capacity,
            default_ttl,
        }
    }

    /// `None` means the deadline is beyond `Instant`'s range and never passes
    fn expiration(&self, ttl: Duration, now: Instant) -> Option<Instant> {
        let ttl = if ttl.is_zero() { self.default_ttl } else { ttl };
        now.checked_add(ttl)
    }

    /// Insert or overwrite `key`
    pub(crate) fn set(&mut self, key: K, value: V, ttl: Duration, now: Instant) -> SetOutcome<K> {
        if self.capacity == 0 {
            return SetOutcome::Ignored;
        }

        let expiration = self.expiration(ttl, now);

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.value = value;
            entry.expiration = expiration;
            entry.frequency = self.index.bump(&key, entry.frequency);
            return SetOutcome::Overwritten;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.evict()
        } else {
            None
        };

        let mut entry = CacheEntry::new(value, expiration);
        self.index.insert_new(key.clone());
        entry.frequency = self.index.bump(&key, entry.frequency);
        self.entries.insert(key, entry);

        SetOutcome::Inserted { evicted }
    }

    /// Live value for `key`, bumping its frequency
    ///
    /// Expired entries are reported as missing but left in place.
    pub(crate) fn get(&mut self, key: &K, now: Instant) -> Option<&V> {
        let entry = self.entries.get_mut(key)?;
        if entry.is_expired(now) {
            return None;
        }

        entry.frequency = self.index.bump(key, entry.frequency);
        Some(&entry.value)
    }

    pub(crate) fn delete(&mut self, key: &K) -> Result<()> {
        let entry = self.entries.remove(key).ok_or(Error::NotFound)?;

        if self.index.remove(key, entry.frequency) {
            self.index.recompute_min();
        }

        Ok(())
    }

    /// Mutate every live entry whose value matches `predicate`
    ///
    /// Returns the number of entries updated.
    pub(crate) fn update<P, M>(&mut self, predicate: P, mut mutator: M, ttl: Duration, now: Instant) -> usize
    where
        P: Fn(&V) -> bool,
        M: FnMut(&mut V),
    {
        let expiration = self.expiration(ttl, now);
        let mut updated = 0;

        for (key, entry) in self.entries.iter_mut() {
            if !predicate(&entry.value) || entry.is_expired(now) {
                continue;
            }

            mutator(&mut entry.value);
            entry.expiration = expiration;
            entry.frequency = self.index.bump(key, entry.frequency);
            updated += 1;
        }

        updated
    }

    /// Remove every expired entry, recomputing the minimum at most once
    ///
    /// Returns the number of entries removed.
    pub(crate) fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let mut min_touched = false;

        self.entries.retain(|key, entry| {
            if entry.is_expired(now) {
                min_touched |= self.index.remove(key, entry.frequency);
                false
            } else {
                true
            }
        });

        if min_touched {
            self.index.recompute_min();
        }

        before - self.entries.len()
    }

    fn evict(&mut self) -> Option<K> {
        let Some(victim) = self.index.victim().cloned() else {
            warn!(
                min_frequency = self.index.min_frequency(),
                "store at capacity but minimum bucket is empty"
            );
            return None;
        };

        trace!(frequency = self.index.min_frequency(), "evicting least frequently used entry");
        if let Some(entry) = self.entries.remove(&victim) {
            if self.index.remove(&victim, entry.frequency) {
                self.index.recompute_min();
            }
        }
        Some(victim)
    }

    pub(crate) fn frequency(&self, key: &K) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.frequency)
    }

    pub(crate) fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub(crate) fn min_frequency(&self) -> Option<u64> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.index.min_frequency())
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Panics if entries and buckets disagree
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        if self.capacity > 0 {
            assert!(self.entries.len() <= self.capacity, "over capacity");
        }
        for (key, entry) in &self.entries {
            assert!(
                self.index.contains(key, entry.frequency),
                "key missing from its bucket"
            );
        }
        assert_eq!(self.index.key_count(), self.entries.len(), "stray keys in buckets");

        if let Some(min) = self.entries.values().map(|entry| entry.frequency).min() {
            assert_eq!(self.index.min_frequency(), min, "stale minimum frequency");
        }
    }
}
