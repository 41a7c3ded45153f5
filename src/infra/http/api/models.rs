//! Wire models for the content API and generated page documents.
//!
//! Field names follow the public JSON contract (camelCase, `type`/`order`
//! on sections). These types deserialize too, so the CLI client can consume
//! the same documents the server produces.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::application::pages::{DetailPage, ListPage};
use crate::domain::entities::{ContentSectionRecord, PostRecord, PostWithSections};
use crate::domain::types::SectionKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub description: String,
    pub image: Option<String>,
    pub category: String,
    pub views: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub content_sections: Vec<SectionPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPayload {
    pub id: i64,
    pub post_id: i64,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub content: Option<String>,
    pub src: Option<String>,
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPageDoc {
    pub posts: Vec<PostPayload>,
    pub categories: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailPageDoc {
    pub post: PostPayload,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IncrementRequest {
    pub id: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewsResponse {
    pub views: i64,
}

impl From<PostWithSections> for PostPayload {
    fn from(entry: PostWithSections) -> Self {
        let PostWithSections { post, sections } = entry;
        PostPayload {
            id: post.id,
            title: post.title,
            content: post.content,
            description: post.description,
            image: post.image,
            category: post.category,
            views: post.views,
            created_at: post.created_at,
            updated_at: post.updated_at,
            content_sections: sections.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ContentSectionRecord> for SectionPayload {
    fn from(record: ContentSectionRecord) -> Self {
        SectionPayload {
            id: record.id,
            post_id: record.post_id,
            kind: record.kind,
            content: record.content,
            src: record.src,
            order: record.position,
        }
    }
}

impl From<&ListPage> for ListPageDoc {
    fn from(page: &ListPage) -> Self {
        ListPageDoc {
            posts: page.posts.iter().cloned().map(Into::into).collect(),
            categories: page.categories.clone(),
            generated_at: page.generated_at,
        }
    }
}

impl From<&DetailPage> for DetailPageDoc {
    fn from(page: &DetailPage) -> Self {
        DetailPageDoc {
            post: page.post.clone().into(),
            generated_at: page.generated_at,
        }
    }
}

impl From<PostPayload> for PostWithSections {
    fn from(payload: PostPayload) -> Self {
        PostWithSections {
            post: PostRecord {
                id: payload.id,
                title: payload.title,
                content: payload.content,
                description: payload.description,
                image: payload.image,
                category: payload.category,
                views: payload.views,
                created_at: payload.created_at,
                updated_at: payload.updated_at,
            },
            sections: payload
                .content_sections
                .into_iter()
                .map(|section| ContentSectionRecord {
                    id: section.id,
                    post_id: section.post_id,
                    kind: section.kind,
                    content: section.content,
                    src: section.src,
                    position: section.order,
                })
                .collect(),
        }
    }
}
