//! In-memory implementation of link repository.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, LinkTotals};
use crate::error::AppError;

const SHORT_CODE_CONSTRAINT: &str = "links_short_code_key";
const ORIGINAL_URL_CONSTRAINT: &str = "links_original_url_key";

#[derive(Debug, Default)]
struct Tables {
    by_code: HashMap<String, Link>,
    code_by_url: HashMap<String, String>,
}

/// Process-local link storage.
///
/// Enforces the same uniqueness rules as the PostgreSQL schema. Used for
/// `STORAGE_BACKEND=memory` and as the backing store in integration tests.
#[derive(Debug)]
pub struct InMemoryLinkRepository {
    tables: RwLock<Tables>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut tables = self.tables.write().await;

        if tables.by_code.contains_key(&new_link.short_code) {
            return Err(AppError::DuplicateConstraint {
                constraint: Some(SHORT_CODE_CONSTRAINT.to_string()),
            });
        }
        if tables.code_by_url.contains_key(&new_link.original_url) {
            return Err(AppError::DuplicateConstraint {
                constraint: Some(ORIGINAL_URL_CONSTRAINT.to_string()),
            });
        }

        let link = Link::new(
            self.next_id.fetch_add(1, Ordering::Relaxed),
            new_link.short_code,
            new_link.original_url,
            0,
            Utc::now(),
        );

        tables
            .code_by_url
            .insert(link.original_url.clone(), link.short_code.clone());
        tables.by_code.insert(link.short_code.clone(), link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.tables.read().await.by_code.get(short_code).cloned())
    }

    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Link>, AppError> {
        let tables = self.tables.read().await;

        Ok(tables
            .code_by_url
            .get(original_url)
            .and_then(|code| tables.by_code.get(code))
            .cloned())
    }

    async fn increment_click_count(&self, short_code: &str) -> Result<(), AppError> {
        if let Some(link) = self.tables.write().await.by_code.get_mut(short_code) {
            link.click_count += 1;
        }

        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Link>, AppError> {
        let tables = self.tables.read().await;

        let mut links: Vec<Link> = tables.by_code.values().cloned().collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        links.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));

        Ok(links)
    }

    async fn totals(&self) -> Result<LinkTotals, AppError> {
        let tables = self.tables.read().await;

        Ok(LinkTotals {
            links: tables.by_code.len() as i64,
            clicks: tables.by_code.values().map(|l| l.click_count).sum(),
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
