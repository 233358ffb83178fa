//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::config::RedirectMode;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::templates::{NotFoundTemplate, RedirectTemplate};

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Behavior
///
/// - Hit with `REDIRECT_MODE=http`: 307 Temporary Redirect
/// - Hit with `REDIRECT_MODE=interstitial`: 200 HTML page that navigates
///   after a short delay
/// - Miss: 404 HTML page
///
/// The click counter is updated in the background; its outcome never
/// affects this response.
///
/// # Errors
///
/// Returns 500 if the storage lookup fails.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let Some(link) = state.link_service.resolve(&code).await? else {
        return Ok((
            StatusCode::NOT_FOUND,
            NotFoundTemplate { short_code: code },
        )
            .into_response());
    };

    let response = match state.redirect_mode {
        RedirectMode::Http => Redirect::temporary(&link.original_url).into_response(),
        RedirectMode::Interstitial => RedirectTemplate {
            short_code: link.short_code,
            original_url: link.original_url,
        }
        .into_response(),
    };

    Ok(response)
}
