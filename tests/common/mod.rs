#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use minilink::application::services::{LinkService, LinkSettings};
use minilink::config::RedirectMode;
use minilink::domain::click_worker::run_click_worker;
use minilink::domain::entities::{Link, NewLink};
use minilink::domain::rate_limiter::RateLimiter;
use minilink::domain::repositories::LinkRepository;
use minilink::infrastructure::persistence::InMemoryLinkRepository;
use minilink::infrastructure::rate_limit::SlidingWindowLimiter;
use minilink::state::AppState;
use tokio::sync::mpsc;

pub const BASE_URL: &str = "http://localhost:3000";
pub const MAX_REQUESTS: usize = 20;

/// Builds state over the in-memory repository with a running click worker.
pub fn create_test_state(redirect_mode: RedirectMode) -> (AppState, Arc<InMemoryLinkRepository>) {
    let repository = Arc::new(InMemoryLinkRepository::new());
    let link_repository: Arc<dyn LinkRepository> = repository.clone();

    let rate_limiter: Arc<dyn RateLimiter> = Arc::new(SlidingWindowLimiter::new(
        MAX_REQUESTS,
        Duration::from_secs(60),
    ));

    let (tx, rx) = mpsc::channel(100);
    tokio::spawn(run_click_worker(rx, link_repository.clone()));

    let link_service = Arc::new(LinkService::new(
        link_repository,
        rate_limiter.clone(),
        tx.clone(),
        LinkSettings {
            base_url: BASE_URL.to_string(),
            ..LinkSettings::default()
        },
    ));

    (
        AppState::new(link_service, rate_limiter, tx, redirect_mode),
        repository,
    )
}

pub async fn create_test_link(repository: &InMemoryLinkRepository, code: &str, url: &str) -> Link {
    repository
        .create(NewLink {
            short_code: code.to_string(),
            original_url: url.to_string(),
        })
        .await
        .unwrap()
}

/// Polls until the stored click count for `code` reaches `expected`.
pub async fn wait_for_clicks(repository: &InMemoryLinkRepository, code: &str, expected: i64) -> i64 {
    let mut count = 0;
    for _ in 0..100 {
        count = repository
            .find_by_code(code)
            .await
            .unwrap()
            .map(|link| link.click_count)
            .unwrap_or_default();
        if count >= expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    count
}
