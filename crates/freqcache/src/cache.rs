//! LfuCache: synchronized LFU cache with TTL and background sweep

use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use parking_lot::Mutex;
use tracing::debug;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::stats::CacheStats;
use crate::store::{LfuStore, SetOutcome};
use crate::sweeper::Sweeper;
use crate::traits::InMemoryLfu;

/// Thread-safe LFU cache
///
/// Every operation, including each sweep pass, runs under one exclusive lock.
/// Share it across threads with `Arc<LfuCache<K, V>>`.
pub struct LfuCache<K, V> {
    /// Entries and frequency buckets
    store: Arc<Mutex<LfuStore<K, V>>>,

    /// Hit/miss/eviction counters
    stats: Arc<CacheStats>,

    /// Background expiration thread, absent in unswept mode
    sweeper: Option<Sweeper>,
}

impl<K, V> LfuCache<K, V>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    /// Create a new cache
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries (0 ignores every insert)
    /// * `default_ttl` - TTL used when a caller passes `Duration::ZERO`
    /// * `sweep_interval` - Period of the background sweep (`Duration::ZERO` disables it)
    ///
    /// # Returns
    /// * `Result<LfuCache>` - Fails only if the sweeper thread cannot be spawned
    pub fn new(capacity: usize, default_ttl: Duration, sweep_interval: Duration) -> Result<Self> {
        Self::with_config(CacheConfig::new(capacity, default_ttl, sweep_interval))
    }

    /// Create a new cache from a [`CacheConfig`]
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        let store = Arc::new(Mutex::new(LfuStore::new(config.capacity, config.default_ttl)));
        let stats = Arc::new(CacheStats::new());

        let sweeper = if config.sweeps() {
            let store = Arc::clone(&store);
            let stats = Arc::clone(&stats);
            Some(Sweeper::spawn(config.sweep_interval, move || {
                sweep(&store, &stats);
            })?)
        } else {
            None
        };

        Ok(Self {
            store,
            stats,
            sweeper,
        })
    }

    /// Insert or overwrite a value
    ///
    /// # Arguments
    /// * `key` - Cache key
    /// * `value` - Value to store
    /// * `ttl` - Time to live (`Duration::ZERO` uses the default TTL)
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        let outcome = self.store.lock().set(key, value, ttl, Instant::now());

        if let SetOutcome::Inserted { evicted } = outcome {
            self.stats.record_insert();
            if evicted.is_some() {
                self.stats.record_eviction();
            }
        }
    }

    /// Get a live value, counting the access
    ///
    /// Expired entries read as `None` but stay in the cache until swept,
    /// deleted or overwritten. The expiration is not refreshed.
    pub fn get(&self, key: &K) -> Option<V> {
        let value = self.store.lock().get(key, Instant::now()).cloned();

        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }

        value
    }

    /// Delete a key
    ///
    /// # Returns
    /// * `Result<()>` - `Error::NotFound` if the key was not present
    pub fn delete(&self, key: &K) -> Result<()> {
        self.store.lock().delete(key)
    }

    /// Mutate every live value matching `predicate`
    ///
    /// Scans the whole cache under the lock. Each match gets `mutator`
    /// applied in place, a fresh expiration, and a frequency bump.
    /// Neither callback may call back into this cache.
    ///
    /// # Returns
    /// * `usize` - Number of entries updated
    pub fn update<P, M>(&self, predicate: P, mutator: M, ttl: Duration) -> usize
    where
        P: Fn(&V) -> bool,
        M: FnMut(&mut V),
    {
        self.store.lock().update(predicate, mutator, ttl, Instant::now())
    }

    /// Run one sweep pass now, regardless of the background schedule
    ///
    /// # Returns
    /// * `usize` - Number of expired entries removed
    pub fn purge_expired(&self) -> usize {
        sweep(&self.store, &self.stats)
    }

    /// Current access count of `key`, expired or not
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.store.lock().frequency(key)
    }

    /// Whether `key` occupies a slot, expired or not
    pub fn contains_key(&self, key: &K) -> bool {
        self.store.lock().contains_key(key)
    }

    /// Smallest access count in the cache, `None` when empty
    pub fn min_frequency(&self) -> Option<u64> {
        self.store.lock().min_frequency()
    }

    /// Number of occupied slots, including expired entries not yet swept
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.store.lock().capacity()
    }

    /// TTL applied when callers pass `Duration::ZERO`
    pub fn default_ttl(&self) -> Duration {
        self.store.lock().default_ttl()
    }

    /// Sweep period, `None` in unswept mode
    pub fn sweep_interval(&self) -> Option<Duration> {
        self.sweeper.as_ref().map(Sweeper::interval)
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Drop every entry and reset statistics
    pub fn clear(&self) {
        self.store.lock().clear();
        self.stats.reset();
    }

    /// Whether the background sweeper is still running
    pub fn is_sweeping(&self) -> bool {
        self.sweeper.as_ref().is_some_and(Sweeper::is_running)
    }

    /// Stop the background sweeper and wait for its thread to exit
    ///
    /// The cache stays usable; expired entries then remain until
    /// overwritten, deleted, or removed by [`purge_expired`](Self::purge_expired).
    /// Dropping the cache does this automatically.
    pub fn shutdown(&self) {
        if let Some(sweeper) = &self.sweeper {
            sweeper.stop();
        }
    }
}

fn sweep<K, V>(store: &Mutex<LfuStore<K, V>>, stats: &CacheStats) -> usize
where
    K: Hash + Eq + Clone,
{
    let removed = store.lock().purge_expired(Instant::now());
    if removed > 0 {
        debug!(removed, "swept expired entries");
        stats.record_expirations(removed);
    }
    removed
}

impl<K, V> InMemoryLfu<K, V> for LfuCache<K, V>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    fn set(&self, key: K, value: V, ttl: Duration) {
        LfuCache::set(self, key, value, ttl);
    }

    fn get(&self, key: &K) -> Option<V> {
        LfuCache::get(self, key)
    }

    fn delete(&self, key: &K) -> Result<()> {
        LfuCache::delete(self, key)
    }

    fn update(&self, predicate: &dyn Fn(&V) -> bool, mutator: &mut dyn FnMut(&mut V), ttl: Duration) {
        LfuCache::update(self, predicate, mutator, ttl);
    }
}
