//! Periodic eviction of idle rate-limit clients.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};

use crate::domain::rate_limiter::RateLimiter;

/// Calls [`RateLimiter::evict_stale`] every `period`, forever.
///
/// Intended to be spawned once at startup; the task ends with the runtime.
pub async fn run_sweeper<R>(limiter: Arc<R>, period: Duration)
where
    R: RateLimiter + ?Sized,
{
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        limiter.evict_stale();
    }
}
