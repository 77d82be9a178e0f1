//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::StoreError;
use async_trait::async_trait;

/// Repository interface for the link store.
///
/// Implementations are the single source of truth for code uniqueness and
/// click accounting, and must stay correct under concurrent callers:
///
/// - [`Self::insert`] enforces uniqueness itself (a constraint, an atomic
///   insert-if-absent), never relying on a prior [`Self::exists`] call.
/// - [`Self::increment_clicks`] is a single atomic "add one", never a
///   read-modify-write pair.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`, `tests/repository_memory.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns true iff a record with exactly this code exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on storage errors.
    async fn exists(&self, code: &str) -> Result<bool, StoreError>;

    /// Inserts a new record with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateCode`] if the code exists at insert time.
    /// Returns [`StoreError::Backend`] on storage errors.
    async fn insert(&self, new_link: NewLink) -> Result<Link, StoreError>;

    /// Finds a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, StoreError>;

    /// Atomically adds one to the click counter of `code`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such record exists.
    /// Returns [`StoreError::Backend`] on storage errors.
    async fn increment_clicks(&self, code: &str) -> Result<(), StoreError>;

    /// Lists up to `limit` links, most recently created first.
    ///
    /// Records created at the same instant are ordered by descending id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on storage errors.
    async fn list_recent(&self, limit: u32) -> Result<Vec<Link>, StoreError>;

    /// Performs a cheap round-trip to the backing store.
    async fn health_check(&self) -> Result<(), StoreError>;

    /// Prefix for cache keys that point at this store's records.
    ///
    /// A store whose contents do not survive a restart must return a value
    /// unique to the instance, so cached codes never outlive their record.
    fn cache_namespace(&self) -> String;
}
