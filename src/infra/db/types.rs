//! Row types bridging Postgres and domain entities.

use sqlx::FromRow;
use time::OffsetDateTime;

use crate::domain::entities::{ContentSectionRecord, PostRecord};
use crate::domain::types::SectionKind;

#[derive(Debug, FromRow)]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub description: String,
    pub image: Option<String>,
    pub category: String,
    pub views: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, FromRow)]
pub struct SectionRow {
    pub id: i64,
    pub post_id: i64,
    pub kind: SectionKind,
    pub content: Option<String>,
    pub src: Option<String>,
    pub position: i32,
}

impl From<PostRow> for PostRecord {
    fn from(row: PostRow) -> Self {
        PostRecord {
            id: row.id,
            title: row.title,
            content: row.content,
            description: row.description,
            image: row.image,
            category: row.category,
            views: row.views,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<SectionRow> for ContentSectionRecord {
    fn from(row: SectionRow) -> Self {
        ContentSectionRecord {
            id: row.id,
            post_id: row.post_id,
            kind: row.kind,
            content: row.content,
            src: row.src,
            position: row.position,
        }
    }
}
