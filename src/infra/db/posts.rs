use std::collections::HashMap;

use async_trait::async_trait;

use crate::application::repos::{ContentRepo, CreatePostParams, RepoError};
use crate::domain::entities::{ContentSectionRecord, PostWithSections};
use crate::domain::sections::{ensure_ordered, order_from_submission};

use super::types::{PostRow, SectionRow};
use super::{PostgresStore, map_sqlx_error};

const POST_COLUMNS: &str =
    "id, title, content, description, image, category, views, created_at, updated_at";
const SECTION_COLUMNS: &str = "id, post_id, kind, content, src, position";

#[async_trait]
impl ContentRepo for PostgresStore {
    async fn list_posts(&self) -> Result<Vec<PostWithSections>, RepoError> {
        let posts: Vec<PostRow> = sqlx::query_as(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        let sections: Vec<SectionRow> = sqlx::query_as(&format!(
            "SELECT {SECTION_COLUMNS} FROM content_sections ORDER BY post_id, position"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        let mut by_post: HashMap<i64, Vec<ContentSectionRecord>> = HashMap::new();
        for row in sections {
            by_post.entry(row.post_id).or_default().push(row.into());
        }

        posts
            .into_iter()
            .map(|row| {
                let sections = by_post.remove(&row.id).unwrap_or_default();
                ensure_ordered(row.id, &sections)?;
                Ok(PostWithSections {
                    post: row.into(),
                    sections,
                })
            })
            .collect()
    }

    async fn list_post_ids(&self) -> Result<Vec<i64>, RepoError> {
        sqlx::query_scalar("SELECT id FROM posts ORDER BY id")
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_post(&self, id: i64) -> Result<Option<PostWithSections>, RepoError> {
        let post: Option<PostRow> =
            sqlx::query_as(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool())
                .await
                .map_err(map_sqlx_error)?;

        let Some(post) = post else {
            return Ok(None);
        };

        let sections: Vec<SectionRow> = sqlx::query_as(&format!(
            "SELECT {SECTION_COLUMNS} FROM content_sections WHERE post_id = $1 ORDER BY position"
        ))
        .bind(id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        let sections: Vec<ContentSectionRecord> =
            sections.into_iter().map(Into::into).collect();
        ensure_ordered(post.id, &sections)?;

        Ok(Some(PostWithSections {
            post: post.into(),
            sections,
        }))
    }

    async fn create_post(
        &self,
        params: CreatePostParams,
    ) -> Result<PostWithSections, RepoError> {
        let CreatePostParams {
            title,
            content,
            description,
            image,
            category,
            sections,
        } = params;

        let mut tx = self.pool().begin().await.map_err(map_sqlx_error)?;

        let post: PostRow = sqlx::query_as(&format!(
            "INSERT INTO posts (title, content, description, image, category) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(&title)
        .bind(&content)
        .bind(&description)
        .bind(&image)
        .bind(&category)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        let ordered = order_from_submission(sections);
        let mut stored = Vec::with_capacity(ordered.len());
        for section in ordered {
            let row: SectionRow = sqlx::query_as(&format!(
                "INSERT INTO content_sections (post_id, kind, content, src, position) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING {SECTION_COLUMNS}"
            ))
            .bind(post.id)
            .bind(section.kind)
            .bind(&section.content)
            .bind(&section.src)
            .bind(section.position)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
            stored.push(row.into());
        }

        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(PostWithSections {
            post: post.into(),
            sections: stored,
        })
    }

    async fn increment_views(&self, id: i64) -> Result<Option<i64>, RepoError> {
        // Single-statement increment: the counter never goes through a
        // read-modify-write window in application code.
        sqlx::query_scalar(
            "UPDATE posts SET views = views + 1, updated_at = now() WHERE id = $1 RETURNING views",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}
