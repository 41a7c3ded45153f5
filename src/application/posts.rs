//! Post repository API: create, list, fetch, increment views.

use std::sync::Arc;

use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::application::error::AppError;
use crate::application::repos::{ContentRepo, CreatePostParams};
use crate::domain::entities::PostWithSections;
use crate::domain::error::DomainError;
use crate::domain::sections::SectionInput;

const METRIC_POSTS_CREATED: &str = "vetrina_posts_created_total";
const METRIC_VIEW_INCREMENTS: &str = "vetrina_view_increments_total";

/// Wire-shaped creation payload.
///
/// Field names mirror the public JSON contract; unknown fields (such as a
/// client-supplied section order) are dropped during deserialization.
/// Presence is validated here, not by the deserializer, so a missing title
/// fails as a validation error rather than a malformed request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostCommand {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub content_sections: Vec<SectionSubmission>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSubmission {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub src: Option<String>,
}

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn ContentRepo>,
}

impl PostService {
    pub fn new(repo: Arc<dyn ContentRepo>) -> Self {
        Self { repo }
    }

    /// Full post list, newest first, each post with its ordered sections.
    pub async fn list_posts(&self) -> Result<Vec<PostWithSections>, AppError> {
        self.repo
            .list_posts()
            .await
            .map_err(|err| AppError::from_repo("list_posts", err))
    }

    pub async fn list_post_ids(&self) -> Result<Vec<i64>, AppError> {
        self.repo
            .list_post_ids()
            .await
            .map_err(|err| AppError::from_repo("list_post_ids", err))
    }

    pub async fn get_post(&self, id: i64) -> Result<PostWithSections, AppError> {
        let post = self
            .repo
            .find_post(id)
            .await
            .map_err(|err| AppError::from_repo("find_post", err))?;
        post.ok_or(AppError::NotFound)
    }

    /// Validates and persists a submission as one atomic unit.
    pub async fn create_post(
        &self,
        command: CreatePostCommand,
    ) -> Result<PostWithSections, AppError> {
        let params = validate_submission(command)?;
        let created = self
            .repo
            .create_post(params)
            .await
            .map_err(|err| AppError::from_repo("create_post", err))?;
        counter!(METRIC_POSTS_CREATED).increment(1);
        Ok(created)
    }

    /// Adds one accepted view to the counter and returns the new total.
    pub async fn increment_views(&self, id: i64) -> Result<i64, AppError> {
        let views = self
            .repo
            .increment_views(id)
            .await
            .map_err(|err| AppError::from_repo("increment_views", err))?;
        match views {
            Some(views) => {
                counter!(METRIC_VIEW_INCREMENTS).increment(1);
                Ok(views)
            }
            None => Err(AppError::NotFound),
        }
    }
}

fn validate_submission(command: CreatePostCommand) -> Result<CreatePostParams, AppError> {
    let title = command.title.unwrap_or_default();
    if title.trim().is_empty() {
        return Err(DomainError::validation("title is required").into());
    }

    let mut sections = Vec::with_capacity(command.content_sections.len());
    for (index, submission) in command.content_sections.into_iter().enumerate() {
        let Some(kind) = submission.kind else {
            return Err(
                DomainError::validation(format!("section {index} is missing its type")).into(),
            );
        };
        let kind = kind
            .parse()
            .map_err(|err| DomainError::validation(format!("section {index}: {err}")))?;
        sections.push(SectionInput {
            kind,
            content: submission.content,
            src: submission.src,
        });
    }

    Ok(CreatePostParams {
        title,
        content: command.content,
        description: command.description.unwrap_or_default(),
        image: command.image,
        category: command.category.unwrap_or_default(),
        sections,
    })
}
