//! Process-local request throttling.
//!
//! - [`SlidingWindowLimiter`] - per-client sliding window over a `DashMap`
//! - [`run_sweeper`] - background eviction of idle clients

mod sliding_window;
mod sweeper;

pub use sliding_window::SlidingWindowLimiter;
pub use sweeper::run_sweeper;
