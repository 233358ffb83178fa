//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_identifier;

/// Creates (or returns the existing) short link for a URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "example.com/some/page" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "shortUrl": "http://localhost:3000/k3x9qa",
///   "shortCode": "k3x9qa",
///   "originalUrl": "https://example.com/some/page"
/// }
/// ```
///
/// # Errors
///
/// - 400 for a missing, blank, invalid or overlong URL, or an unreadable body
/// - 429 when the client (first `X-Forwarded-For` entry, else `X-Real-IP`)
///   exceeded its creation limit
/// - 500 when no unique code could be generated or storage failed
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::InvalidRequest(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    payload.validate()?;

    let client = client_identifier(&headers);
    let url = payload.url.unwrap_or_default();

    let link = state.link_service.shorten(&url, &client).await?;

    Ok(Json(link.into()))
}
