//! Process-local sliding-window rate limiter.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

use crate::domain::rate_limiter::RateLimiter;

/// In-memory rate limiter keyed by client identity.
///
/// Each client keeps the timestamps of its accepted requests. On every call
/// the window is recomputed relative to "now", so this is a true sliding
/// window rather than fixed buckets. State is not shared across processes
/// and is lost on restart.
///
/// Per-client updates are serialized by the map's entry guard, which keeps
/// recorded timestamps monotonic per client.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    max_requests: usize,
    window: Duration,
    clients: DashMap<String, VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    /// Creates a limiter used by [`RateLimiter::check`].
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: DashMap::new(),
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns whether `identifier` may make another request now.
    ///
    /// Keeps only timestamps newer than `now - window`. If `limit` of them
    /// remain the attempt is rejected and not recorded; otherwise `now` is
    /// appended and the attempt is allowed.
    pub fn allow(&self, identifier: &str, limit: usize, window: Duration) -> bool {
        let mut entry = self.clients.entry(identifier.to_string()).or_default();
        let now = Instant::now();
        Self::admit(entry.value_mut(), limit, window, now)
    }

    /// Same as [`Self::allow`] with an explicit clock reading.
    pub fn allow_at(&self, identifier: &str, limit: usize, window: Duration, now: Instant) -> bool {
        let mut entry = self.clients.entry(identifier.to_string()).or_default();
        Self::admit(entry.value_mut(), limit, window, now)
    }

    fn admit(requests: &mut VecDeque<Instant>, limit: usize, window: Duration, now: Instant) -> bool {
        // Near process start `now - window` may precede the clock origin;
        // then every recorded request is inside the window.
        if let Some(window_start) = now.checked_sub(window) {
            requests.retain(|&t| t > window_start);
        }

        if requests.len() >= limit {
            return false;
        }

        requests.push_back(now);
        true
    }

    /// Removes clients whose newest request is older than the window at `now`.
    pub fn evict_stale_at(&self, now: Instant) -> usize {
        let Some(window_start) = now.checked_sub(self.window) else {
            return 0;
        };

        let before = self.clients.len();
        self.clients
            .retain(|_, requests| requests.back().is_some_and(|&t| t > window_start));
        let removed = before.saturating_sub(self.clients.len());

        if removed > 0 {
            debug!(removed, remaining = self.clients.len(), "Evicted stale rate-limit entries");
        }

        removed
    }
}

impl RateLimiter for SlidingWindowLimiter {
    fn check(&self, client: &str) -> bool {
        self.allow(client, self.max_requests, self.window)
    }

    fn evict_stale(&self) -> usize {
        self.evict_stale_at(Instant::now())
    }

    fn tracked_clients(&self) -> usize {
        self.clients.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    fn start() -> Instant {
        // Far enough from the clock origin that `now - WINDOW` is representable.
        Instant::now() + Duration::from_secs(3600)
    }

    #[test]
    fn test_allows_up_to_limit() {
        let limiter = SlidingWindowLimiter::new(20, WINDOW);
        let t0 = start();

        for i in 0..20 {
            let now = t0 + Duration::from_millis(i * 10);
            assert!(limiter.allow_at("1.2.3.4", 20, WINDOW, now), "request {i}");
        }
    }

    #[test]
    fn test_rejects_request_over_limit() {
        let limiter = SlidingWindowLimiter::new(3, WINDOW);
        let t0 = start();

        assert!(limiter.allow_at("client", 3, WINDOW, t0));
        assert!(limiter.allow_at("client", 3, WINDOW, t0 + Duration::from_secs(1)));
        assert!(limiter.allow_at("client", 3, WINDOW, t0 + Duration::from_secs(2)));
        assert!(!limiter.allow_at("client", 3, WINDOW, t0 + Duration::from_secs(3)));
    }

    #[test]
    fn test_allows_again_after_window_elapses() {
        let limiter = SlidingWindowLimiter::new(2, WINDOW);
        let t0 = start();

        assert!(limiter.allow_at("client", 2, WINDOW, t0));
        assert!(limiter.allow_at("client", 2, WINDOW, t0));
        assert!(!limiter.allow_at("client", 2, WINDOW, t0 + Duration::from_secs(30)));
        assert!(limiter.allow_at("client", 2, WINDOW, t0 + WINDOW + Duration::from_millis(1)));
    }

    #[test]
    fn test_window_slides_rather_than_resets() {
        let limiter = SlidingWindowLimiter::new(2, WINDOW);
        let t0 = start();

        assert!(limiter.allow_at("client", 2, WINDOW, t0));
        assert!(limiter.allow_at("client", 2, WINDOW, t0 + Duration::from_secs(40)));

        // First request expired, second still inside the window.
        let t1 = t0 + Duration::from_secs(61);
        assert!(limiter.allow_at("client", 2, WINDOW, t1));
        assert!(!limiter.allow_at("client", 2, WINDOW, t1 + Duration::from_secs(1)));
    }

    #[test]
    fn test_boundary_timestamp_is_outside_window() {
        let limiter = SlidingWindowLimiter::new(1, WINDOW);
        let t0 = start();

        assert!(limiter.allow_at("client", 1, WINDOW, t0));
        // Exactly `window` later the old timestamp equals window_start and is dropped.
        assert!(limiter.allow_at("client", 1, WINDOW, t0 + WINDOW));
    }

    #[test]
    fn test_rejected_attempts_are_not_recorded() {
        let limiter = SlidingWindowLimiter::new(1, WINDOW);
        let t0 = start();

        assert!(limiter.allow_at("client", 1, WINDOW, t0));
        for s in 1..50 {
            assert!(!limiter.allow_at("client", 1, WINDOW, t0 + Duration::from_secs(s)));
        }

        // Only the accepted request counts, so it expires on schedule.
        assert!(limiter.allow_at("client", 1, WINDOW, t0 + Duration::from_secs(61)));
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = SlidingWindowLimiter::new(1, WINDOW);
        let t0 = start();

        assert!(limiter.allow_at("a", 1, WINDOW, t0));
        assert!(!limiter.allow_at("a", 1, WINDOW, t0));
        assert!(limiter.allow_at("b", 1, WINDOW, t0));
    }

    #[test]
    fn test_check_uses_configured_limit() {
        let limiter = SlidingWindowLimiter::new(2, WINDOW);

        assert!(limiter.check("unknown"));
        assert!(limiter.check("unknown"));
        assert!(!limiter.check("unknown"));
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn test_short_real_window_expires() {
        let window = Duration::from_millis(30);
        let limiter = SlidingWindowLimiter::new(1, window);

        assert!(limiter.allow("client", 1, window));
        assert!(!limiter.allow("client", 1, window));

        std::thread::sleep(Duration::from_millis(60));
        assert!(limiter.allow("client", 1, window));
    }

    #[test]
    fn test_evict_stale_removes_only_expired_clients() {
        let limiter = SlidingWindowLimiter::new(5, WINDOW);
        let t0 = start();

        limiter.allow_at("old", 5, WINDOW, t0);
        limiter.allow_at("fresh", 5, WINDOW, t0 + Duration::from_secs(50));
        assert_eq!(limiter.tracked_clients(), 2);

        let removed = limiter.evict_stale_at(t0 + Duration::from_secs(70));

        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked_clients(), 1);
        assert!(!limiter.allow_at("fresh", 1, WINDOW, t0 + Duration::from_secs(70)));
    }

    #[test]
    fn test_concurrent_checks_do_not_lose_updates() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let limiter = Arc::new(SlidingWindowLimiter::new(50, WINDOW));
        let allowed = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = limiter.clone();
                let allowed = allowed.clone();
                std::thread::spawn(move || {
                    for _ in 0..20 {
                        if limiter.check("shared") {
                            allowed.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(allowed.load(Ordering::SeqCst), 50);
    }
}
