//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::ShortenedLink;

/// Longest URL accepted by the create endpoint.
pub const MAX_URL_LENGTH: u64 = 2048;

/// Request to shorten a single URL.
///
/// `url` is optional at the serde level so a missing field reaches the
/// service and is reported as "URL is required" rather than a parse error.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[serde(default)]
    #[validate(length(max = MAX_URL_LENGTH, message = "URL is too long"))]
    pub url: Option<String>,
}

/// Response for a created or deduplicated link.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
    pub short_code: String,
    pub original_url: String,
}

impl From<ShortenedLink> for ShortenResponse {
    fn from(link: ShortenedLink) -> Self {
        Self {
            short_url: link.short_url,
            short_code: link.short_code,
            original_url: link.original_url,
        }
    }
}
