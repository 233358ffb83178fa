//! URL normalization and validation.
//!
//! Normalization only adds a scheme; the stored destination is otherwise the
//! exact text the user submitted, so dedup compares like with like.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    /// Control characters (newline, tab, NUL, ...) cannot appear in a
    /// `Location` header or a Postgres `TEXT` column.
    #[error("URL contains control characters")]
    ControlCharacter,
}

/// Prefixes `https://` onto input that lacks an `http://` or `https://` scheme.
///
/// No other transformation is applied: no trimming, no case folding,
/// no trailing-slash handling.
///
/// # Examples
///
/// ```
/// use minilink::utils::url_normalizer::normalize_url;
///
/// assert_eq!(normalize_url("example.com"), "https://example.com");
/// assert_eq!(normalize_url("http://example.com"), "http://example.com");
/// ```
pub fn normalize_url(input: &str) -> String {
    if input.starts_with("http://") || input.starts_with("https://") {
        return input.to_string();
    }

    format!("https://{input}")
}

/// Parses the normalized form of `input` as an absolute URL with a host.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::ControlCharacter`] for input the URL
/// parser would silently strip or encode, and
/// [`UrlNormalizationError::InvalidFormat`] when URL parsing fails. The
/// parser rejects an empty host for `http`/`https` on its own.
pub fn parse_normalized(input: &str) -> Result<Url, UrlNormalizationError> {
    if input.chars().any(char::is_control) {
        return Err(UrlNormalizationError::ControlCharacter);
    }

    Url::parse(&normalize_url(input))
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))
}

/// Returns true iff the normalized form of `input` is a valid absolute URL.
///
/// Never panics. Deliberately permissive: a bare word such as `text`
/// becomes `https://text`, which is a valid single-label host.
pub fn is_valid_url(input: &str) -> bool {
    match parse_normalized(input) {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!(url = input, error = %e, "Rejected URL");
            false
        }
    }
}
