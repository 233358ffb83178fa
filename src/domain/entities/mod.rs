//! Core domain entities.
//!
//! [`Link`] is the only persisted entity; [`NewLink`] carries the fields
//! needed to create one.

pub mod link;

pub use link::{Link, NewLink};
