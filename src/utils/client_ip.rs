//! Client identity extraction from HTTP request headers.

use axum::http::HeaderMap;

/// Header set by reverse proxies with the original client chain.
pub const FORWARDED_FOR: &str = "x-forwarded-for";

/// Header set by some proxies (nginx) with the original client address.
pub const REAL_IP: &str = "x-real-ip";

/// Identifier shared by every client that sends neither proxy header.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Derives the rate-limit identity of the requesting client.
///
/// Priority:
/// 1. First entry of `X-Forwarded-For`
/// 2. `X-Real-IP`
/// 3. The literal `"unknown"`
///
/// Headers with non-UTF-8 values or empty entries are skipped.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// assert_eq!(client_identifier(&headers), "203.0.113.7");
/// ```
pub fn client_identifier(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get(FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    let real_ip = headers
        .get(REAL_IP)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    real_ip.unwrap_or(UNKNOWN_CLIENT).to_string()
}
