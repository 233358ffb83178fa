//! Application layer services implementing business logic.
//!
//! Services consume the domain's repository and rate-limiter traits and
//! provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and resolution

pub mod services;
