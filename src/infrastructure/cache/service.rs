//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Read-through cache of `key -> original_url` mappings for the redirect path.
///
/// Keys are short codes prefixed with the link store's cache namespace. A
/// mapping can outlive its record when the store loses data (a restarted
/// in-memory store), so callers confirm hits against the store's click
/// increment. Click counts are never cached.
///
/// Cache failures must degrade to store lookups, never fail a redirect.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL cached under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss
    async fn get_url(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping using the implementation's default TTL.
    async fn set_url(&self, key: &str, original_url: &str) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;

    /// Human-readable backend name for health reports.
    fn backend_name(&self) -> &'static str;
}
