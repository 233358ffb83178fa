//! Link repository implementations.
//!
//! - [`PgLinkRepository`] - PostgreSQL storage via SQLx
//! - [`InMemoryLinkRepository`] - Process-local storage for development and tests

pub mod in_memory_link_repository;
pub mod pg_link_repository;

pub use in_memory_link_repository::InMemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
