//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::PostWithSections;
use crate::domain::sections::{SectionInput, SectionOrderError};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<SectionOrderError> for RepoError {
    fn from(err: SectionOrderError) -> Self {
        Self::Integrity {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePostParams {
    pub title: String,
    pub content: Option<String>,
    pub description: String,
    pub image: Option<String>,
    pub category: String,
    /// Sections in submission order; positions are assigned from this
    /// order via [`crate::domain::sections::order_from_submission`], never
    /// supplied by the caller.
    pub sections: Vec<SectionInput>,
}

/// Persistent store of posts and their ordered sections.
///
/// Implementations must make `create_post` a single transactional unit (the
/// post and all its sections become visible together or not at all) and
/// `increment_views` an atomic add with no read-modify-write window.
#[async_trait]
pub trait ContentRepo: Send + Sync {
    /// All posts ordered by creation time descending, sections ordered
    /// ascending by position.
    async fn list_posts(&self) -> Result<Vec<PostWithSections>, RepoError>;

    /// Ids of every stored post, for page warm-up.
    async fn list_post_ids(&self) -> Result<Vec<i64>, RepoError>;

    async fn find_post(&self, id: i64) -> Result<Option<PostWithSections>, RepoError>;

    async fn create_post(&self, params: CreatePostParams)
    -> Result<PostWithSections, RepoError>;

    /// Adds exactly one to the stored counter and returns the new value, or
    /// `None` when the id is unknown.
    async fn increment_views(&self, id: i64) -> Result<Option<i64>, RepoError>;
}
