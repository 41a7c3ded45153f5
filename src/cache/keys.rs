//! Cache key definitions for generated pages.

/// Identifies one independently cached page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKey {
    /// The post listing page.
    List,
    /// The detail page for one post id.
    Detail(i64),
}
