//! Cache backend implementations.
//!
//! Concrete implementations of the `Cache` trait from
//! `noteshare_core::cache`, selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `memory` (default): in-process LRU cache
//! - `redis`: Redis cache using a shared connection manager
//!
//! These features are mutually exclusive - only one cache backend can be
//! enabled at a time.

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!(
    "Features 'memory' and 'redis' are mutually exclusive. \
    Enable only one cache backend at a time."
);

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!(
    "No cache backend selected. Enable 'memory' or 'redis' feature. \
    Example: cargo build -p noteshare --features sqlite,redis --no-default-features"
);

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

#[cfg(feature = "memory")]
pub use memory::MemoryCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;
