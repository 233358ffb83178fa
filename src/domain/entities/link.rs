//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its usage counter.
///
/// Once created, `short_code` and `original_url` are never changed; only
/// `click_count` is mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        short_code: String,
        original_url: String,
        click_count: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_code,
            original_url,
            click_count,
            created_at,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub short_code: String,
    pub original_url: String,
}
