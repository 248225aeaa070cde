//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Services hold repository and cache trait objects, so
//! the backend combination is selected at compile time via feature flags
//! while the handlers stay backend-agnostic.

use std::sync::Arc;

use noteshare_core::cache::Cache;
use noteshare_core::storage::{CollaborationRepository, NoteRepository, UserRepository};

use crate::config::Config;
use crate::service::{AccessControl, CollaborationService, NoteService, UserService};

// ============================================================================
// Compile-time feature validation
// ============================================================================

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!("Cannot enable both 'sqlite' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "sqlite")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'sqlite'");

// Cache features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!("Cannot enable both 'memory' and 'redis' cache features");

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!("Must enable exactly one cache feature: 'memory' or 'redis'");

/// Shared application state.
///
/// This is cloned for each request handler; the services inside are
/// process-wide singletons behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Note lifecycle operations with the cache-aside listing layer.
    pub notes: Arc<NoteService>,
    /// Collaboration grant management.
    pub collaborations: Arc<CollaborationService>,
    /// User registration and lookup.
    pub users: Arc<UserService>,
    /// Ownership and collaboration checks, run by handlers before service
    /// calls.
    pub access: Arc<AccessControl>,
}

impl AppState {
    /// Creates an AppState wiring the given stores and cache into the
    /// services.
    fn build(
        note_repo: Arc<dyn NoteRepository>,
        collaboration_repo: Arc<dyn CollaborationRepository>,
        user_repo: Arc<dyn UserRepository>,
        cache: Arc<dyn Cache>,
        config: &Config,
    ) -> Self {
        Self {
            notes: Arc::new(NoteService::new(
                note_repo.clone(),
                user_repo.clone(),
                cache,
                config.cache_ttl(),
            )),
            collaborations: Arc::new(CollaborationService::new(collaboration_repo.clone())),
            users: Arc::new(UserService::new(user_repo)),
            access: Arc::new(AccessControl::new(note_repo, collaboration_repo)),
        }
    }
}

// ============================================================================
// Factory functions for different backend combinations
// ============================================================================

#[cfg(all(feature = "sqlite", feature = "memory"))]
mod sqlite_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            Ok(Self::build(
                sqlite_repo.clone(),
                sqlite_repo.clone(),
                sqlite_repo,
                memory_cache,
                config,
            ))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "redis"))]
mod sqlite_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let redis_cache = Arc::new(RedisCache::new(&config.redis_url).await?);

            Ok(Self::build(
                sqlite_repo.clone(),
                sqlite_repo.clone(),
                sqlite_repo,
                redis_cache,
                config,
            ))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and cache.
        /// Useful for testing without any external dependencies.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let inmemory_repo = Arc::new(InMemoryRepository::new());
            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            Ok(Self::build(
                inmemory_repo.clone(),
                inmemory_repo.clone(),
                inmemory_repo,
                memory_cache,
                config,
            ))
        }
    }
}

// ============================================================================
// Test support
// ============================================================================

#[cfg(all(test, feature = "inmemory", feature = "memory"))]
impl Default for AppState {
    /// Creates an AppState with in-memory storage for testing.
    fn default() -> Self {
        let config = Config {
            cache_ttl_seconds: None,
            cache_max_entries: 1_000,
            sqlite_path: String::new(),
            redis_url: String::new(),
        };
        let repo = Arc::new(crate::storage::InMemoryRepository::new());
        let cache = Arc::new(crate::cache::MemoryCache::new(config.cache_max_entries));

        Self::build(repo.clone(), repo.clone(), repo, cache, &config)
    }
}
