//! Synchronous filtering over the materialized post list.
//!
//! The filter never touches the network: it runs over the listing page a
//! client already holds. State is reflected into a URL query string so the
//! active filter is navigable and shareable without a reload.

use url::form_urlencoded;

use crate::domain::entities::{PostRecord, PostWithSections};

/// Synthetic category meaning "no category filter".
pub const ALL_CATEGORY: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub category: Option<String>,
}

impl FilterState {
    /// Selects a category button; the synthetic "All" entry clears the
    /// filter.
    pub fn select_category(&mut self, label: &str) {
        self.category = if label == ALL_CATEGORY || label.is_empty() {
            None
        } else {
            Some(label.to_string())
        };
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    /// A post matches iff its title or content contains the search term
    /// (case-insensitively) and, when a category is selected, the category
    /// matches exactly.
    pub fn matches(&self, post: &PostRecord) -> bool {
        let term = self.search.to_lowercase();
        let title_hit = post.title.to_lowercase().contains(&term);
        let content_hit = post
            .content
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            .contains(&term);
        let category_hit = self
            .category
            .as_deref()
            .is_none_or(|category| post.category == category);
        (title_hit || content_hit) && category_hit
    }

    pub fn apply<'a>(&self, posts: &'a [PostWithSections]) -> Vec<&'a PostWithSections> {
        posts
            .iter()
            .filter(|entry| self.matches(&entry.post))
            .collect()
    }

    /// Encodes the active filter as a URL query string; empty when nothing
    /// is active.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(category) = &self.category {
            serializer.append_pair("category", category);
        }
        if !self.search.is_empty() {
            serializer.append_pair("q", &self.search);
        }
        serializer.finish()
    }

    pub fn from_query(query: &str) -> Self {
        let mut state = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "category" => state.select_category(value.as_ref()),
                "q" => state.search = value.into_owned(),
                _ => {}
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;
    use crate::domain::entities::PostWithSections;

    fn post(id: i64, title: &str, content: Option<&str>, category: &str) -> PostWithSections {
        PostWithSections {
            post: PostRecord {
                id,
                title: title.to_string(),
                content: content.map(str::to_string),
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

    fn sample() -> Vec<PostWithSections> {
        vec![
            post(1, "Yaks and how to shave them", None, "tools"),
            post(2, "Quiet gardens", Some("mostly about moss"), "life"),
            post(3, "Build systems", Some("yak-adjacent rambling"), "tools"),
            post(4, "Sourdough", None, "life"),
            post(5, "Terminal colors", Some("ansi tables"), "tools"),
        ]
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_content() {
        let posts = sample();
        let mut state = FilterState::default();
        state.set_search("YAK");
        let ids: Vec<i64> = state.apply(&posts).iter().map(|p| p.post.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn missing_content_never_matches_a_term() {
        let posts = vec![post(1, "title only", None, "misc")];
        let mut state = FilterState::default();
        state.set_search("anything");
        assert!(state.apply(&posts).is_empty());
    }

    #[test]
    fn category_must_match_exactly() {
        let posts = sample();
        let mut state = FilterState::default();
        state.select_category("life");
        let ids: Vec<i64> = state.apply(&posts).iter().map(|p| p.post.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn selecting_all_clears_the_category() {
        let mut state = FilterState::default();
        state.select_category("tools");
        assert_eq!(state.category.as_deref(), Some("tools"));
        state.select_category(ALL_CATEGORY);
        assert_eq!(state.category, None);
    }

    #[test]
    fn predicates_commute() {
        let posts = sample();

        let mut category_first = FilterState::default();
        category_first.select_category("tools");
        category_first.set_search("yak");

        let mut search_first = FilterState::default();
        search_first.set_search("yak");
        search_first.select_category("tools");

        let a: Vec<i64> = category_first
            .apply(&posts)
            .iter()
            .map(|p| p.post.id)
            .collect();
        let b: Vec<i64> = search_first
            .apply(&posts)
            .iter()
            .map(|p| p.post.id)
            .collect();
        assert_eq!(a, b);
        assert_eq!(a, vec![1, 3]);
    }

    #[test]
    fn applying_twice_is_idempotent() {
        let posts = sample();
        let mut state = FilterState::default();
        state.set_search("yak");
        state.select_category("tools");

        let once: Vec<i64> = state.apply(&posts).iter().map(|p| p.post.id).collect();
        let narrowed: Vec<PostWithSections> =
            state.apply(&posts).into_iter().cloned().collect();
        let twice: Vec<i64> = state.apply(&narrowed).iter().map(|p| p.post.id).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn query_round_trips() {
        let mut state = FilterState::default();
        state.select_category("tools");
        state.set_search("yak shaving");

        let query = state.to_query();
        assert_eq!(query, "category=tools&q=yak+shaving");
        assert_eq!(FilterState::from_query(&query), state);
    }

    #[test]
    fn empty_state_encodes_to_empty_query() {
        assert_eq!(FilterState::default().to_query(), "");
        assert_eq!(FilterState::from_query(""), FilterState::default());
    }

    #[test]
    fn all_in_query_means_no_category() {
        let state = FilterState::from_query("category=All");
        assert_eq!(state.category, None);
    }
}
