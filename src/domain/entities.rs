//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::types::SectionKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
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

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentSectionRecord {
    pub id: i64,
    pub post_id: i64,
    pub kind: SectionKind,
    pub content: Option<String>,
    pub src: Option<String>,
    pub position: i32,
}

/// A post together with its sections, ordered ascending by position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostWithSections {
    pub post: PostRecord,
    pub sections: Vec<ContentSectionRecord>,
}
