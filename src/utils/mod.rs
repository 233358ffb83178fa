//! Utility functions for code generation, URL processing, and request handling.
//!
//! - [`code_generator`] - Random short codes and sequence encoding
//! - [`url_normalizer`] - URL normalization and validation
//! - [`client_ip`] - Client identity from proxy headers

pub mod client_ip;
pub mod code_generator;
pub mod url_normalizer;
