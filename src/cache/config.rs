//! Cache configuration.

use std::num::NonZeroUsize;
use std::time::Duration;

const DEFAULT_REVALIDATE_SECS: u64 = 60;
const DEFAULT_DETAIL_LIMIT: usize = 256;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a generated page is served without triggering background
    /// regeneration.
    pub revalidate: Duration,
    /// Maximum number of detail pages kept before LRU eviction.
    pub detail_limit: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            revalidate: Duration::from_secs(DEFAULT_REVALIDATE_SECS),
            detail_limit: DEFAULT_DETAIL_LIMIT,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            revalidate: Duration::from_secs(settings.revalidate_secs),
            detail_limit: settings.detail_limit,
        }
    }
}

impl CacheConfig {
    /// Detail limit as `NonZeroUsize`, clamping zero to one.
    pub fn detail_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.detail_limit).unwrap_or(NonZeroUsize::MIN)
    }
}
