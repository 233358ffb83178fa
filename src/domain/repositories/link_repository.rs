//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Aggregate counts across all stored links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkTotals {
    pub links: i64,
    pub clicks: i64,
}

/// Repository interface for short links.
///
/// Both short codes and original URLs are unique at the storage layer;
/// [`LinkRepository::create`] reports a violation of either as
/// [`AppError::DuplicateConstraint`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - process-local maps
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link with `click_count = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateConstraint`] if the code or the URL is
    /// already stored. Returns [`AppError::Unexpected`] on storage errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by exact short code.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by exact (already normalized) original URL.
    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Link>, AppError>;

    /// Adds one to the click counter of `short_code`.
    ///
    /// A missing code is not an error.
    async fn increment_click_count(&self, short_code: &str) -> Result<(), AppError>;

    /// Lists the most recently created links, newest first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<Link>, AppError>;

    /// Returns the number of links and the sum of their click counters.
    async fn totals(&self) -> Result<LinkTotals, AppError>;

    /// Checks that the storage backend is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
