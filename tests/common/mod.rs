#![allow(dead_code)] // each test binary uses a different slice of this helper

//! In-memory `ContentRepo` used by the integration tests.
//!
//! Mirrors the store contract: creation is atomic (a post appears with all
//! its sections or not at all), positions come from submission order, and
//! the view counter is incremented under one lock.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use vetrina::application::repos::{ContentRepo, CreatePostParams, RepoError};
use vetrina::domain::entities::{ContentSectionRecord, PostRecord, PostWithSections};
use vetrina::domain::sections::{SectionInput, order_from_submission};
use vetrina::domain::types::SectionKind;

#[derive(Default)]
pub struct InMemoryContent {
    posts: Mutex<Vec<PostWithSections>>,
    next_post_id: AtomicI64,
    next_section_id: AtomicI64,
    pub list_calls: AtomicUsize,
    pub find_calls: AtomicUsize,
    failing: AtomicBool,
    latency: Duration,
}

impl InMemoryContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repo whose reads take a while, so overlapping generations are
    /// observable.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// When set, every operation fails with a persistence error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn post_count(&self) -> usize {
        self.posts.lock().await.len()
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn find_call_count(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub async fn seed(&self, title: &str, category: &str, content: Option<&str>) -> i64 {
        let created = self
            .create_post(CreatePostParams {
                title: title.to_string(),
                content: content.map(str::to_string),
                description: String::new(),
                image: None,
                category: category.to_string(),
                sections: vec![SectionInput {
                    kind: SectionKind::Text,
                    content: Some(format!("{title} body")),
                    src: None,
                }],
            })
            .await
            .expect("seed post");
        created.post.id
    }

    fn check_failing(&self) -> Result<(), RepoError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepoError::Persistence("injected failure".to_string()));
        }
        Ok(())
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl ContentRepo for InMemoryContent {
    async fn list_posts(&self) -> Result<Vec<PostWithSections>, RepoError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        self.simulate_latency().await;

        let mut posts = self.posts.lock().await.clone();
        posts.sort_by(|a, b| {
            b.post
                .created_at
                .cmp(&a.post.created_at)
                .then(b.post.id.cmp(&a.post.id))
        });
        Ok(posts)
    }

    async fn list_post_ids(&self) -> Result<Vec<i64>, RepoError> {
        self.check_failing()?;
        let mut ids: Vec<i64> = self
            .posts
            .lock()
            .await
            .iter()
            .map(|entry| entry.post.id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn find_post(&self, id: i64) -> Result<Option<PostWithSections>, RepoError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        self.simulate_latency().await;

        Ok(self
            .posts
            .lock()
            .await
            .iter()
            .find(|entry| entry.post.id == id)
            .cloned())
    }

    async fn create_post(
        &self,
        params: CreatePostParams,
    ) -> Result<PostWithSections, RepoError> {
        self.check_failing()?;
        if params.title.is_empty() {
            // The real store rejects this via a CHECK constraint.
            return Err(RepoError::Integrity {
                message: "new row violates check constraint on posts.title".to_string(),
            });
        }

        let id = self.next_post_id.fetch_add(1, Ordering::SeqCst) + 1;
        // Deterministic, strictly increasing timestamps keep ordering
        // assertions stable.
        let created_at = OffsetDateTime::UNIX_EPOCH + Duration::from_secs(id as u64);

        let sections = order_from_submission(params.sections)
            .into_iter()
            .map(|section| ContentSectionRecord {
                id: self.next_section_id.fetch_add(1, Ordering::SeqCst) + 1,
                post_id: id,
                kind: section.kind,
                content: section.content,
                src: section.src,
                position: section.position,
            })
            .collect();

        let entry = PostWithSections {
            post: PostRecord {
                id,
                title: params.title,
                content: params.content,
                description: params.description,
                image: params.image,
                category: params.category,
                views: 0,
                created_at,
                updated_at: created_at,
            },
            sections,
        };

        self.posts.lock().await.push(entry.clone());
        Ok(entry)
    }

    async fn increment_views(&self, id: i64) -> Result<Option<i64>, RepoError> {
        self.check_failing()?;
        let mut posts = self.posts.lock().await;
        Ok(posts.iter_mut().find(|entry| entry.post.id == id).map(
            |entry| {
                entry.post.views += 1;
                entry.post.views
            },
        ))
    }
}
