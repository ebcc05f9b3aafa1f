//! Stored value with its expiration and access counter

use std::time::Instant;

/// A single cached value
#[derive(Debug)]
pub(crate) struct CacheEntry<V> {
    pub(crate) value: V,
    /// `None` when the TTL reaches past what `Instant` can represent
    pub(crate) expiration: Option<Instant>,
    pub(crate) frequency: u64,
}

impl<V> CacheEntry<V> {
    /// New entries start at frequency 0
    pub(crate) fn new(value: V, expiration: Option<Instant>) -> Self {
        Self {
            value,
            expiration,
            frequency: 0,
        }
    }

    /// True once `now` is strictly past the expiration
    pub(crate) fn is_expired(&self, now: Instant) -> bool {
        self.expiration.is_some_and(|at| now > at)
    }
}
