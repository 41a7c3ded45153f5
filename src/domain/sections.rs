//! Section ordering rules.
//!
//! Positions within one post are assigned from submission order at creation
//! time and form the contiguous sequence `0..n`. They are never renumbered.

use thiserror::Error;

use crate::domain::entities::ContentSectionRecord;
use crate::domain::types::SectionKind;

/// A section as submitted by an author, before any position is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionInput {
    pub kind: SectionKind,
    pub content: Option<String>,
    pub src: Option<String>,
}

/// A section with its creation-time position.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedSection {
    pub kind: SectionKind,
    pub content: Option<String>,
    pub src: Option<String>,
    pub position: i32,
}

/// Assigns contiguous positions from submission order.
///
/// The input index is the only source of ordering; anything a client may have
/// claimed about ordering is discarded before this point.
pub fn order_from_submission(inputs: Vec<SectionInput>) -> Vec<OrderedSection> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| OrderedSection {
            kind: input.kind,
            content: input.content,
            src: input.src,
            position: index as i32,
        })
        .collect()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SectionOrderError {
    #[error("post `{post_id}` section `{id}` carries negative position `{position}`")]
    NegativePosition { post_id: i64, id: i64, position: i32 },
    #[error("post `{post_id}` sections skip position {expected} (found {found})")]
    Gap {
        post_id: i64,
        expected: i32,
        found: i32,
    },
}

/// Verifies that stored sections form the contiguous sequence `0..n`.
///
/// Callers pass sections already sorted ascending by position, as the store
/// returns them.
pub fn ensure_ordered(
    post_id: i64,
    sections: &[ContentSectionRecord],
) -> Result<(), SectionOrderError> {
    for (index, section) in sections.iter().enumerate() {
        if section.position < 0 {
            return Err(SectionOrderError::NegativePosition {
                post_id,
                id: section.id,
                position: section.position,
            });
        }
        let expected = index as i32;
        if section.position != expected {
            return Err(SectionOrderError::Gap {
                post_id,
                expected,
                found: section.position,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, position: i32) -> ContentSectionRecord {
        ContentSectionRecord {
            id,
            post_id: 7,
            kind: SectionKind::Text,
            content: Some(format!("section {position}")),
            src: None,
            position,
        }
    }

    #[test]
    fn submission_order_becomes_position() {
        let ordered = order_from_submission(vec![
            SectionInput {
                kind: SectionKind::Text,
                content: Some("a".into()),
                src: None,
            },
            SectionInput {
                kind: SectionKind::Image,
                content: None,
                src: Some("http://x/y.png".into()),
            },
            SectionInput {
                kind: SectionKind::Code,
                content: Some("fn main() {}".into()),
                src: None,
            },
        ]);

        let positions: Vec<i32> = ordered.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(ordered[1].kind, SectionKind::Image);
        assert_eq!(ordered[1].src.as_deref(), Some("http://x/y.png"));
    }

    #[test]
    fn empty_submission_is_empty() {
        assert!(order_from_submission(Vec::new()).is_empty());
    }

    #[test]
    fn contiguous_sequence_is_accepted() {
        let sections = vec![record(1, 0), record(2, 1), record(3, 2)];
        assert_eq!(ensure_ordered(7, &sections), Ok(()));
    }

    #[test]
    fn gap_is_rejected() {
        let sections = vec![record(1, 0), record(2, 2)];
        let err = ensure_ordered(7, &sections).expect_err("gap");
        assert_eq!(
            err,
            SectionOrderError::Gap {
                post_id: 7,
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn negative_position_is_rejected() {
        let sections = vec![record(1, -1)];
        let err = ensure_ordered(7, &sections).expect_err("negative");
        assert!(matches!(err, SectionOrderError::NegativePosition { .. }));
    }
}
