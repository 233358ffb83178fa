//! Server-rendered pages for the redirect route.

use askama::Template;
use askama_web::WebTemplate;

/// Delay before the interstitial page navigates on its own.
pub const INTERSTITIAL_DELAY_MS: u64 = 1500;

/// Page shown for an unknown short code.
///
/// Renders `templates/not_found.html`; the handler pairs it with a 404 status.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub short_code: String,
}

/// Interstitial page that shows the destination before navigating to it.
///
/// Renders `templates/redirect.html` with:
/// - The destination URL (escaped)
/// - "Open link" and "Go back" actions
/// - Automatic navigation after [`INTERSTITIAL_DELAY_MS`]
#[derive(Template, WebTemplate)]
#[template(path = "redirect.html")]
pub struct RedirectTemplate {
    pub short_code: String,
    pub original_url: String,
}

impl RedirectTemplate {
    pub fn delay_ms(&self) -> u64 {
        INTERSTITIAL_DELAY_MS
    }
}
