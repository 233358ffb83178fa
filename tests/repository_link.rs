//! PostgreSQL repository tests. Each test gets a fresh migrated database from
//! `#[sqlx::test]`; run with `cargo test -- --ignored` and `DATABASE_URL` set.

use minilink::domain::entities::NewLink;
use minilink::domain::repositories::LinkRepository;
use minilink::error::AppError;
use minilink::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(code: &str, url: &str) -> NewLink {
    NewLink {
        short_code: code.to_string(),
        original_url: url.to_string(),
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_create_and_find_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let created = repo
        .create(new_link("test12", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(created.short_code, "test12");
    assert_eq!(created.click_count, 0);

    let by_code = repo.find_by_code("test12").await.unwrap().unwrap();
    assert_eq!(by_code, created);

    let by_url = repo
        .find_by_original_url("https://example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_url.id, created.id);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_find_missing(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.find_by_code("nope00").await.unwrap().is_none());
    assert!(
        repo.find_by_original_url("https://nowhere.example")
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_duplicate_code_rejected(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("dup123", "https://a.example.com"))
        .await
        .unwrap();
    let result = repo
        .create(new_link("dup123", "https://b.example.com"))
        .await;

    assert!(matches!(
        result,
        Err(AppError::DuplicateConstraint { .. })
    ));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_duplicate_url_rejected(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("first1", "https://example.com"))
        .await
        .unwrap();
    let result = repo
        .create(new_link("second", "https://example.com"))
        .await;

    assert!(matches!(
        result,
        Err(AppError::DuplicateConstraint { .. })
    ));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_increment_and_totals(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("aaaaaa", "https://a.example.com"))
        .await
        .unwrap();
    repo.create(new_link("bbbbbb", "https://b.example.com"))
        .await
        .unwrap();

    repo.increment_click_count("aaaaaa").await.unwrap();
    repo.increment_click_count("aaaaaa").await.unwrap();
    repo.increment_click_count("bbbbbb").await.unwrap();
    // Unknown codes are a no-op.
    repo.increment_click_count("zzzzzz").await.unwrap();

    let link = repo.find_by_code("aaaaaa").await.unwrap().unwrap();
    assert_eq!(link.click_count, 2);

    let totals = repo.totals().await.unwrap();
    assert_eq!(totals.links, 2);
    assert_eq!(totals.clicks, 3);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_list_recent_and_ping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    for i in 0..5 {
        repo.create(new_link(&format!("code0{i}"), &format!("https://example.com/{i}")))
            .await
            .unwrap();
    }

    let links = repo.list_recent(3).await.unwrap();
    assert_eq!(links.len(), 3);

    repo.ping().await.unwrap();
}
