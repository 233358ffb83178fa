//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`rate_limiter`] - Per-client throttle contract
//! - [`click_event`] - Click counting event model
//! - [`click_worker`] - Asynchronous click counter worker
//!
//! The domain layer has no dependencies on infrastructure or presentation;
//! business logic lives in [`crate::application::services`].
//!
//! # Click Processing Flow
//!
//! 1. A short code resolves to a link
//! 2. [`click_event::ClickEvent`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] increments the counter
//! 4. Failures are discarded; the redirect has already been answered

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod rate_limiter;
pub mod repositories;
