//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, LinkTotals};
use crate::error::AppError;

/// Row shape shared by every `links` query.
#[derive(Debug, sqlx::FromRow)]
struct LinkRow {
    id: i64,
    short_code: String,
    original_url: String,
    click_count: i64,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(
            row.id,
            row.short_code,
            row.original_url,
            row.click_count,
            row.created_at,
        )
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Uniqueness of `short_code` and `original_url` is enforced by the
/// `links_short_code_key` constraint and the `links_original_url_key` index;
/// violations surface as [`AppError::DuplicateConstraint`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (short_code, original_url)
            VALUES ($1, $2)
            RETURNING id, short_code, original_url, click_count, created_at
            "#,
        )
        .bind(&new_link.short_code)
        .bind(&new_link.original_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, short_code, original_url, click_count, created_at
            FROM links
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Link>, AppError> {
        // md5() lets the lookup use the unique index on md5(original_url).
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, short_code, original_url, click_count, created_at
            FROM links
            WHERE md5(original_url) = md5($1) AND original_url = $1
            "#,
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn increment_click_count(&self, short_code: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE links SET click_count = click_count + 1 WHERE short_code = $1")
            .bind(short_code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, short_code, original_url, click_count, created_at
            FROM links
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn totals(&self) -> Result<LinkTotals, AppError> {
        let (links, clicks): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*)::BIGINT, COALESCE(SUM(click_count), 0)::BIGINT FROM links",
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(LinkTotals { links, clicks })
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
