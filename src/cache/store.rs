//! Cache storage for generated page documents.
//!
//! The list page lives in a singleton slot; detail pages live in an LRU
//! keyed by post id. Every entry remembers when it was generated so callers
//! can apply the revalidation policy. Entries are never invalidated by
//! writes: posts are immutable after creation apart from the view counter,
//! and staleness is bounded by the revalidation window.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use lru::LruCache;

use crate::application::pages::{DetailPage, ListPage};

use super::config::CacheConfig;
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::store";

struct Entry<T> {
    page: Arc<T>,
    generated_at: Instant,
}

impl<T> Entry<T> {
    fn new(page: Arc<T>) -> Self {
        Self {
            page,
            generated_at: Instant::now(),
        }
    }

    fn snapshot(&self) -> Cached<T> {
        Cached {
            page: Arc::clone(&self.page),
            age: self.generated_at.elapsed(),
        }
    }
}

/// A cached page together with its age, for staleness decisions.
pub struct Cached<T> {
    pub page: Arc<T>,
    pub age: Duration,
}

pub struct PageStore {
    list: RwLock<Option<Entry<ListPage>>>,
    details: RwLock<LruCache<i64, Entry<DetailPage>>>,
}

impl PageStore {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            list: RwLock::new(None),
            details: RwLock::new(LruCache::new(config.detail_limit_non_zero())),
        }
    }

    pub fn get_list(&self) -> Option<Cached<ListPage>> {
        rw_read(&self.list, SOURCE, "get_list")
            .as_ref()
            .map(Entry::snapshot)
    }

    pub fn set_list(&self, page: Arc<ListPage>) {
        *rw_write(&self.list, SOURCE, "set_list") = Some(Entry::new(page));
    }

    pub fn get_detail(&self, id: i64) -> Option<Cached<DetailPage>> {
        rw_write(&self.details, SOURCE, "get_detail")
            .get(&id)
            .map(Entry::snapshot)
    }

    pub fn set_detail(&self, id: i64, page: Arc<DetailPage>) {
        rw_write(&self.details, SOURCE, "set_detail").put(id, Entry::new(page));
    }

    pub fn detail_count(&self) -> usize {
        rw_read(&self.details, SOURCE, "detail_count").len()
    }
}
