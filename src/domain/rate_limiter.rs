//! Per-client request throttling contract.

/// A request throttle keyed by client identity.
///
/// Implementations must be safe to call concurrently from every request
/// handler; recorded attempts for a single client must not be lost.
///
/// # Implementations
///
/// - [`crate::infrastructure::rate_limit::SlidingWindowLimiter`] - process-local sliding window
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait RateLimiter: Send + Sync {
    /// Records an attempt for `client` and returns whether it is allowed.
    ///
    /// Rejected attempts are not recorded.
    fn check(&self, client: &str) -> bool;

    /// Drops clients with no attempts left in the current window.
    ///
    /// Returns the number of clients removed.
    fn evict_stale(&self) -> usize;

    /// Number of clients currently holding state.
    fn tracked_clients(&self) -> usize;
}
