//! Browser-facing HTML pages.
//!
//! Uses Askama templates from the crate's `templates/` directory for
//! server-side rendering.
//!
//! # Modules
//!
//! - [`templates`] - Not-found and interstitial redirect pages

pub mod templates;
