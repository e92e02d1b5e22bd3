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

/// Trait for caching serialized listing responses.
///
/// Listing and aggregate responses change only when the dataset is re-ingested,
/// so they are cached for a short TTL keyed by the normalized request.
/// Implementations must be thread-safe and fail open: a cache failure degrades
/// to a store query, never to an error response.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a cached JSON body.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(body))` on cache hit
    /// - `Ok(None)` on cache miss or error (fail-open behavior)
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a JSON body with an optional TTL in seconds.
    ///
    /// When `ttl_seconds` is `None` the implementation's default applies.
    ///
    /// # Errors
    ///
    /// Should not propagate errors to callers. Implementations log them and
    /// return `Ok(())`.
    async fn set(&self, key: &str, body: &str, ttl_seconds: Option<u64>) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short name reported by the health endpoint.
    fn backend(&self) -> &'static str;
}
