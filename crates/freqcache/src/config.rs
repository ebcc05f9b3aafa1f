//! Cache construction parameters

use std::time::Duration;

/// Default maximum number of entries
pub const DEFAULT_CAPACITY: usize = 1024;

/// Default time-to-live applied when a caller passes a zero TTL
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default period between background sweeps
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Configuration for an [`LfuCache`](crate::LfuCache)
///
/// A zero `capacity` produces a cache that silently ignores every insert.
/// A zero `sweep_interval` disables the background sweeper for the lifetime
/// of the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries held at once
    pub capacity: usize,

    /// TTL used when a caller passes `Duration::ZERO`
    pub default_ttl: Duration,

    /// Period between expiration sweeps
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_ttl: DEFAULT_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

impl CacheConfig {
    /// Create a config with explicit values
    pub fn new(capacity: usize, default_ttl: Duration, sweep_interval: Duration) -> Self {
        Self {
            capacity,
            default_ttl,
            sweep_interval,
        }
    }

    /// Set the maximum number of entries
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the fallback TTL
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Set the sweep period (`Duration::ZERO` disables sweeping)
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Whether a background sweeper will be started
    pub fn sweeps(&self) -> bool {
        !self.sweep_interval.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert_eq!(config.default_ttl, DEFAULT_TTL);
        assert!(config.sweeps());
    }

    #[test]
    fn test_config_builder() {
        let config = CacheConfig::default()
            .with_capacity(8)
            .with_default_ttl(Duration::from_millis(50))
            .with_sweep_interval(Duration::ZERO);

        assert_eq!(
            config,
            CacheConfig::new(8, Duration::from_millis(50), Duration::ZERO)
        );
        assert!(!config.sweeps());
    }
}
