//! Link creation and resolution service.

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, error, info};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::{Link, NewLink};
use crate::domain::rate_limiter::RateLimiter;
use crate::domain::repositories::{LinkRepository, LinkTotals};
use crate::error::AppError;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code, is_reserved};
use crate::utils::url_normalizer::{is_valid_url, normalize_url};

/// Tunables for [`LinkService`].
#[derive(Debug, Clone)]
pub struct LinkSettings {
    /// Prefix of every returned short URL, e.g. `https://min.ik`.
    pub base_url: String,
    pub code_length: usize,
    /// Bound on the generate-and-check loop.
    pub max_attempts: usize,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: 10,
        }
    }
}

/// Result of a successful shorten call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedLink {
    pub short_url: String,
    pub short_code: String,
    pub original_url: String,
}

/// Service for shortening URLs and resolving short codes.
///
/// The create path validates, throttles, deduplicates and then generates a
/// unique code. The resolve path looks a code up and hands the click counter
/// update to the background worker without waiting for it.
pub struct LinkService<L: LinkRepository + ?Sized, R: RateLimiter + ?Sized> {
    link_repository: Arc<L>,
    rate_limiter: Arc<R>,
    click_sender: mpsc::Sender<ClickEvent>,
    settings: LinkSettings,
}

impl<L: LinkRepository + ?Sized, R: RateLimiter + ?Sized> LinkService<L, R> {
    /// Creates a new link service.
    pub fn new(
        link_repository: Arc<L>,
        rate_limiter: Arc<R>,
        click_sender: mpsc::Sender<ClickEvent>,
        settings: LinkSettings,
    ) -> Self {
        Self {
            link_repository,
            rate_limiter,
            click_sender,
            settings,
        }
    }

    /// Shortens `raw_url` on behalf of `client`.
    ///
    /// # Flow
    ///
    /// 1. Reject blank input
    /// 2. Normalize (add `https://` if no scheme) and validate
    /// 3. Apply the per-client rate limit
    /// 4. Return the existing link for the same normalized URL, if any
    /// 5. Generate a code not yet in storage (bounded attempts)
    /// 6. Persist and return `{base_url}/{code}`
    ///
    /// # Errors
    ///
    /// - [`AppError::EmptyInput`] / [`AppError::InvalidUrl`] for bad input
    /// - [`AppError::RateLimited`] when the client is over its limit; nothing is written
    /// - [`AppError::CodeGenerationExhausted`] if every candidate collided
    /// - [`AppError::DuplicateConstraint`] if a concurrent writer won the race
    pub async fn shorten(&self, raw_url: &str, client: &str) -> Result<ShortenedLink, AppError> {
        let trimmed = raw_url.trim();
        if trimmed.is_empty() {
            return Err(AppError::EmptyInput);
        }

        let normalized_url = normalize_url(trimmed);
        if !is_valid_url(&normalized_url) {
            return Err(AppError::InvalidUrl {
                url: raw_url.to_string(),
            });
        }

        if !self.rate_limiter.check(client) {
            info!(client, "Rate limit exceeded");
            return Err(AppError::RateLimited);
        }

        if let Some(existing) = self
            .link_repository
            .find_by_original_url(&normalized_url)
            .await?
        {
            debug!(short_code = %existing.short_code, "Existing link found");
            return Ok(self.to_shortened(existing));
        }

        let short_code = self.generate_unique_code().await?;

        let link = self
            .link_repository
            .create(NewLink {
                short_code,
                original_url: normalized_url,
            })
            .await?;

        info!(short_code = %link.short_code, "New link created");

        Ok(self.to_shortened(link))
    }

    /// Resolves a short code to its link.
    ///
    /// Returns `Ok(None)` when the code is unknown. On a hit, a click event is
    /// queued without waiting; a full or closed queue drops the event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unexpected`] on storage errors.
    pub async fn resolve(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        let Some(link) = self.link_repository.find_by_code(short_code).await? else {
            debug!(short_code, "Short code not found");
            return Ok(None);
        };

        self.record_click(&link.short_code);

        Ok(Some(link))
    }

    /// Builds the public short URL for `short_code`.
    pub fn short_url(&self, short_code: &str) -> String {
        format!(
            "{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            short_code
        )
    }

    /// Link and click totals, for operators.
    pub async fn totals(&self) -> Result<LinkTotals, AppError> {
        self.link_repository.totals().await
    }

    /// Checks that the storage backend is reachable.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    fn to_shortened(&self, link: Link) -> ShortenedLink {
        ShortenedLink {
            short_url: self.short_url(&link.short_code),
            short_code: link.short_code,
            original_url: link.original_url,
        }
    }

    fn record_click(&self, short_code: &str) {
        match self.click_sender.try_send(ClickEvent::new(short_code)) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                debug!(short_code = %event.short_code, "Click queue full, event dropped");
            }
            Err(TrySendError::Closed(event)) => {
                debug!(short_code = %event.short_code, "Click queue closed, event dropped");
            }
        }
    }

    /// Generates a code that is neither stored nor reserved.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for _ in 0..self.settings.max_attempts {
            let code = generate_code(self.settings.code_length);

            if is_reserved(&code) {
                continue;
            }

            if self.link_repository.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }
        }

        error!(
            attempts = self.settings.max_attempts,
            "Failed to generate unique code: too many collisions"
        );

        Err(AppError::CodeGenerationExhausted {
            attempts: self.settings.max_attempts,
        })
    }
}
