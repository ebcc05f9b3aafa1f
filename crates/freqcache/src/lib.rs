//! # freqcache
//!
//! Bounded in-memory cache with LFU eviction and per-entry expiration.
//!
//! ## Architecture
//! - **HashMap**: AHash-keyed entries (value, expiration, access count)
//! - **Frequency buckets**: access count -> keys, plus the current minimum,
//!   so the eviction victim is found in O(1)
//! - **Sweeper**: optional background thread purging expired entries
//! - **Facade**: one `parking_lot::Mutex` around all state
//!
//! ## Example
//! ```
//! use std::time::Duration;
//! use freqcache::LfuCache;
//!
//! let cache = LfuCache::new(2, Duration::from_secs(60), Duration::ZERO).unwrap();
//! cache.set("a".to_string(), 1, Duration::ZERO);
//! cache.set("b".to_string(), 2, Duration::ZERO);
//! cache.get(&"a".to_string());
//! cache.set("c".to_string(), 3, Duration::ZERO); // evicts "b"
//!
//! assert_eq!(cache.get(&"b".to_string()), None);
//! assert_eq!(cache.get(&"c".to_string()), Some(3));
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod entry;
mod error;
mod frequency;
mod stats;
mod store;
mod sweeper;
mod traits;

pub use cache::LfuCache;
pub use config::{CacheConfig, DEFAULT_CAPACITY, DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL};
pub use error::{Error, Result};
pub use stats::{CacheStats, StatsSnapshot};
pub use traits::InMemoryLfu;
