//! Generated-page cache.
//!
//! Stores materialized list/detail page documents with a time-based
//! revalidation policy: fresh entries are served directly, stale entries are
//! served while a single background regeneration runs, and unknown detail
//! ids are generated on first request behind a per-key single-flight guard.

mod config;
mod flight;
mod keys;
mod lock;
mod store;

pub use config::CacheConfig;
pub use flight::FlightMap;
pub use keys::PageKey;
pub use store::{Cached, PageStore};
