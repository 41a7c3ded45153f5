//! Static page generation with time-based revalidation.
//!
//! Pages are materialized documents built from the repository: one listing
//! page and one detail page per post id. A page younger than the revalidation
//! window is served as-is. An older page is still served, while exactly one
//! background regeneration refreshes it. A detail id never generated before
//! is built on first request behind a single-flight guard, so concurrent
//! requesters wait on one generation instead of racing their own.

use std::sync::Arc;

use metrics::counter;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::warn;

use crate::application::error::AppError;
use crate::application::listing::ALL_CATEGORY;
use crate::application::repos::ContentRepo;
use crate::cache::{CacheConfig, FlightMap, PageKey, PageStore};
use crate::domain::entities::PostWithSections;

const METRIC_PAGE_HIT: &str = "vetrina_page_cache_hit_total";
const METRIC_PAGE_MISS: &str = "vetrina_page_cache_miss_total";
const METRIC_PAGE_STALE_SERVED: &str = "vetrina_page_cache_stale_served_total";
const METRIC_PAGE_REGEN_FAIL: &str = "vetrina_page_regen_fail_total";

/// Materialized listing page: the full post list plus the categories present,
/// prefixed with the synthetic "All" entry.
#[derive(Debug, Clone, Serialize)]
pub struct ListPage {
    pub posts: Vec<PostWithSections>,
    pub categories: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
}

/// Materialized detail page for one post.
#[derive(Debug, Clone, Serialize)]
pub struct DetailPage {
    pub post: PostWithSections,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
}

/// Outcome of a warm-up pass. Failures are page-local; the pass never aborts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WarmSummary {
    pub generated: usize,
    pub failed: usize,
}

#[derive(Clone)]
pub struct PageService {
    repo: Arc<dyn ContentRepo>,
    store: Arc<PageStore>,
    flights: Arc<FlightMap>,
    config: CacheConfig,
}

impl PageService {
    pub fn new(repo: Arc<dyn ContentRepo>, config: CacheConfig) -> Self {
        Self {
            repo,
            store: Arc::new(PageStore::new(&config)),
            flights: Arc::new(FlightMap::new()),
            config,
        }
    }

    /// The listing page, generated on first request and revalidated in the
    /// background once it outlives the configured window.
    pub async fn list_page(&self) -> Result<Arc<ListPage>, AppError> {
        if let Some(cached) = self.store.get_list() {
            if cached.age <= self.config.revalidate {
                counter!(METRIC_PAGE_HIT).increment(1);
            } else {
                counter!(METRIC_PAGE_STALE_SERVED).increment(1);
                self.spawn_list_refresh();
            }
            return Ok(cached.page);
        }

        counter!(METRIC_PAGE_MISS).increment(1);
        let lease = self.flights.lease(PageKey::List);
        let _guard = lease.lock().await;
        // A concurrent flight may have stored the page while we waited.
        if let Some(cached) = self.store.get_list() {
            return Ok(cached.page);
        }
        let page = self.generate_list().await?;
        self.store.set_list(Arc::clone(&page));
        Ok(page)
    }

    /// The detail page for `id`, or `None` when the post does not exist.
    /// Unknown ids are not cached; a later create makes them resolvable.
    pub async fn detail_page(&self, id: i64) -> Result<Option<Arc<DetailPage>>, AppError> {
        if let Some(cached) = self.store.get_detail(id) {
            if cached.age <= self.config.revalidate {
                counter!(METRIC_PAGE_HIT).increment(1);
            } else {
                counter!(METRIC_PAGE_STALE_SERVED).increment(1);
                self.spawn_detail_refresh(id);
            }
            return Ok(Some(cached.page));
        }

        counter!(METRIC_PAGE_MISS).increment(1);
        let key = PageKey::Detail(id);
        let lease = self.flights.lease(key);
        let _guard = lease.lock().await;
        if let Some(cached) = self.store.get_detail(id) {
            return Ok(Some(cached.page));
        }
        match self.generate_detail(id).await? {
            Some(page) => {
                self.store.set_detail(id, Arc::clone(&page));
                Ok(Some(page))
            }
            None => {
                drop(_guard);
                self.flights.forget(&key);
                Ok(None)
            }
        }
    }

    /// Pre-generates the listing page and a detail page for every known id.
    pub async fn warm(&self) -> WarmSummary {
        let mut summary = WarmSummary::default();

        match self.generate_list().await {
            Ok(page) => {
                self.store.set_list(page);
                summary.generated += 1;
            }
            Err(err) => {
                summary.failed += 1;
                warn!(target: "vetrina::pages", error = %err, "list page warm-up failed");
            }
        }

        let ids = match self.repo.list_post_ids().await {
            Ok(ids) => ids,
            Err(err) => {
                summary.failed += 1;
                warn!(target: "vetrina::pages", error = %err, "could not enumerate post ids for warm-up");
                return summary;
            }
        };

        let results = futures::future::join_all(ids.into_iter().map(|id| {
            let service = self.clone();
            async move { (id, service.generate_detail(id).await) }
        }))
        .await;

        for (id, result) in results {
            match result {
                Ok(Some(page)) => {
                    self.store.set_detail(id, page);
                    summary.generated += 1;
                }
                Ok(None) => {}
                Err(err) => {
                    summary.failed += 1;
                    warn!(target: "vetrina::pages", post_id = id, error = %err, "detail page warm-up failed");
                }
            }
        }

        summary
    }

    fn spawn_list_refresh(&self) {
        let service = self.clone();
        tokio::spawn(async move {
            let lease = service.flights.lease(PageKey::List);
            let Ok(_guard) = lease.try_lock() else {
                return; // a regeneration is already running
            };
            if let Some(cached) = service.store.get_list() {
                if cached.age <= service.config.revalidate {
                    return;
                }
            }
            match service.generate_list().await {
                Ok(page) => service.store.set_list(page),
                Err(err) => {
                    counter!(METRIC_PAGE_REGEN_FAIL).increment(1);
                    warn!(
                        target: "vetrina::pages",
                        error = %err,
                        "list page regeneration failed; previous page stays live"
                    );
                }
            }
        });
    }

    fn spawn_detail_refresh(&self, id: i64) {
        let service = self.clone();
        tokio::spawn(async move {
            let lease = service.flights.lease(PageKey::Detail(id));
            let Ok(_guard) = lease.try_lock() else {
                return;
            };
            if let Some(cached) = service.store.get_detail(id) {
                if cached.age <= service.config.revalidate {
                    return;
                }
            }
            match service.generate_detail(id).await {
                Ok(Some(page)) => service.store.set_detail(id, page),
                Ok(None) => {
                    // Posts are never deleted; a vanished row would be a
                    // store-level anomaly. Keep serving the previous page.
                    warn!(target: "vetrina::pages", post_id = id, "post disappeared during regeneration");
                }
                Err(err) => {
                    counter!(METRIC_PAGE_REGEN_FAIL).increment(1);
                    warn!(
                        target: "vetrina::pages",
                        post_id = id,
                        error = %err,
                        "detail page regeneration failed; previous page stays live"
                    );
                }
            }
        });
    }

    async fn generate_list(&self) -> Result<Arc<ListPage>, AppError> {
        let posts = self
            .repo
            .list_posts()
            .await
            .map_err(|err| AppError::from_repo("list_posts", err))?;
        let categories = derive_categories(&posts);
        Ok(Arc::new(ListPage {
            posts,
            categories,
            generated_at: OffsetDateTime::now_utc(),
        }))
    }

    async fn generate_detail(&self, id: i64) -> Result<Option<Arc<DetailPage>>, AppError> {
        let post = self
            .repo
            .find_post(id)
            .await
            .map_err(|err| AppError::from_repo("find_post", err))?;
        Ok(post.map(|post| {
            Arc::new(DetailPage {
                post,
                generated_at: OffsetDateTime::now_utc(),
            })
        }))
    }
}

/// Distinct categories in list order, behind the synthetic "All" entry that
/// means "no filter". Posts without a category contribute nothing.
fn derive_categories(posts: &[PostWithSections]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORY.to_string()];
    for entry in posts {
        let category = &entry.post.category;
        if !category.is_empty() && !categories[1..].contains(category) {
            categories.push(category.clone());
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;
    use crate::domain::entities::PostRecord;

    fn post_in(category: &str) -> PostWithSections {
        PostWithSections {
            post: PostRecord {
                id: 1,
                title: "title".into(),
                content: None,
                description: String::new(),
                image: None,
                category: category.to_string(),
                views: 0,
                created_at: OffsetDateTime::UNIX_EPOCH,
                updated_at: OffsetDateTime::UNIX_EPOCH,
            },
            sections: Vec::new(),
        }
    }

    #[test]
    fn categories_start_with_all_and_deduplicate() {
        let posts = vec![
            post_in("rust"),
            post_in("life"),
            post_in("rust"),
            post_in(""),
        ];
        assert_eq!(derive_categories(&posts), vec!["All", "rust", "life"]);
    }

    #[test]
    fn empty_list_still_offers_all() {
        assert_eq!(derive_categories(&[]), vec!["All"]);
    }
}
