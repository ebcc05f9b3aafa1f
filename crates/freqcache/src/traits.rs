//! The cache capability handed to consumers

use std::time::Duration;

use crate::error::Result;

/// Minimal LFU cache surface: set, get, delete, and bulk update
///
/// A zero `ttl` anywhere means "use the cache's default TTL".
pub trait InMemoryLfu<K, V> {
    /// Store `value` under `key`, evicting the least frequently used entry
    /// if a new key does not fit
    fn set(&self, key: K, value: V, ttl: Duration);

    /// Live value for `key`, counting the access
    fn get(&self, key: &K) -> Option<V>;

    /// Remove `key`, failing with [`Error::NotFound`](crate::Error::NotFound)
    /// if it is absent
    fn delete(&self, key: &K) -> Result<()>;

    /// Apply `mutator` to every live value matching `predicate`, refreshing
    /// its expiration and counting the access
    fn update(&self, predicate: &dyn Fn(&V) -> bool, mutator: &mut dyn FnMut(&mut V), ttl: Duration);
}
