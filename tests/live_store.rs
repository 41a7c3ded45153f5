//! Live store round-trips against a configured Postgres.
//!
//! - Connects via `DATABASE_URL` and applies the bundled migrations.
//! - Writes real rows; point it at a disposable database.
//! - Marked `#[ignore]` so it only runs manually: `cargo test -- --ignored`.

use std::sync::Arc;

use vetrina::application::repos::{ContentRepo, CreatePostParams};
use vetrina::domain::sections::SectionInput;
use vetrina::domain::types::SectionKind;
use vetrina::infra::db::PostgresStore;

type TestResult = Result<(), Box<dyn std::error::Error>>;

async fn connect() -> Result<PostgresStore, Box<dyn std::error::Error>> {
    let url = std::env::var("DATABASE_URL")
        .map_err(|_| "DATABASE_URL must point at a disposable Postgres database")?;
    let pool = PostgresStore::connect(&url, 4).await?;
    PostgresStore::run_migrations(&pool).await?;
    Ok(PostgresStore::new(pool))
}

fn params(title: &str, sections: Vec<SectionInput>) -> CreatePostParams {
    CreatePostParams {
        title: title.to_string(),
        content: Some("body".to_string()),
        description: "summary".to_string(),
        image: None,
        category: "integration".to_string(),
        sections,
    }
}

#[tokio::test]
#[ignore]
async fn create_then_fetch_preserves_submission_order() -> TestResult {
    let store = connect().await?;

    let created = store
        .create_post(params(
            "ordering round-trip",
            vec![
                SectionInput {
                    kind: SectionKind::Text,
                    content: Some("a".to_string()),
                    src: None,
                },
                SectionInput {
                    kind: SectionKind::Image,
                    content: None,
                    src: Some("http://x/y.png".to_string()),
                },
            ],
        ))
        .await?;

    let positions: Vec<i32> = created.sections.iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![0, 1]);

    let fetched = store
        .find_post(created.post.id)
        .await?
        .expect("created post is fetchable");
    assert_eq!(fetched.sections.len(), 2);
    assert_eq!(fetched.sections[0].kind, SectionKind::Text);
    assert_eq!(fetched.sections[0].content.as_deref(), Some("a"));
    assert_eq!(fetched.sections[1].kind, SectionKind::Image);
    assert_eq!(fetched.sections[1].src.as_deref(), Some("http://x/y.png"));
    Ok(())
}

#[tokio::test]
#[ignore]
async fn concurrent_increments_are_lossless() -> TestResult {
    let store = Arc::new(connect().await?);
    let created = store.create_post(params("contended counter", Vec::new())).await?;
    let id = created.post.id;
    assert_eq!(created.post.views, 0);

    let results = futures::future::join_all((0..10).map(|_| {
        let store = Arc::clone(&store);
        async move { store.increment_views(id).await }
    }))
    .await;

    for result in results {
        assert!(result?.is_some());
    }

    let fetched = store.find_post(id).await?.expect("post");
    assert_eq!(fetched.post.views, 10);
    Ok(())
}

#[tokio::test]
#[ignore]
async fn empty_title_is_rejected_by_the_store() -> TestResult {
    let store = connect().await?;

    let before: i64 = sqlx::query_scalar("SELECT count(*) FROM posts")
        .fetch_one(store.pool())
        .await?;

    let result = store
        .create_post(params(
            "",
            vec![SectionInput {
                kind: SectionKind::Text,
                content: Some("orphan".to_string()),
                src: None,
            }],
        ))
        .await;
    assert!(result.is_err());

    let after: i64 = sqlx::query_scalar("SELECT count(*) FROM posts")
        .fetch_one(store.pool())
        .await?;
    assert_eq!(before, after, "failed create must not leave partial rows");

    let orphans: i64 = sqlx::query_scalar(
        "SELECT count(*) FROM content_sections s \
         WHERE NOT EXISTS (SELECT 1 FROM posts p WHERE p.id = s.post_id)",
    )
    .fetch_one(store.pool())
    .await?;
    assert_eq!(orphans, 0);
    Ok(())
}

#[tokio::test]
#[ignore]
async fn unknown_id_is_absent_not_partial() -> TestResult {
    let store = connect().await?;
    assert!(store.find_post(i64::MAX).await?.is_none());
    assert!(store.increment_views(i64::MAX).await?.is_none());
    Ok(())
}
