//! Shared state injected into every HTTP handler.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::LinkService;
use crate::config::RedirectMode;
use crate::domain::click_event::ClickEvent;
use crate::domain::rate_limiter::RateLimiter;
use crate::domain::repositories::LinkRepository;

/// Link service over type-erased storage and throttling backends.
pub type DynLinkService = LinkService<dyn LinkRepository, dyn RateLimiter>;

/// Application state cloned into each request.
///
/// All fields are cheap to clone (`Arc` or channel handles).
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    /// Same limiter the service uses; exposed for health reporting.
    pub rate_limiter: Arc<dyn RateLimiter>,
    /// Sender half of the click queue; the service holds a clone.
    pub click_sender: mpsc::Sender<ClickEvent>,
    pub redirect_mode: RedirectMode,
}

impl AppState {
    pub fn new(
        link_service: Arc<DynLinkService>,
        rate_limiter: Arc<dyn RateLimiter>,
        click_sender: mpsc::Sender<ClickEvent>,
        redirect_mode: RedirectMode,
    ) -> Self {
        Self {
            link_service,
            rate_limiter,
            click_sender,
            redirect_mode,
        }
    }
}
