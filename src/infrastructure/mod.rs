//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Link storage (PostgreSQL and in-memory)
//! - [`rate_limit`] - Process-local request throttling

pub mod persistence;
pub mod rate_limit;
