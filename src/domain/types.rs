//! Shared domain enumerations aligned with persisted database enums.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of section payload kinds.
///
/// `Text` and `Code` carry their payload in `content`; `Image` and `Video`
/// carry theirs in `src`. The non-authoritative field may still be stored,
/// but consumers ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "section_kind", rename_all = "snake_case")]
pub enum SectionKind {
    Text,
    Image,
    Code,
    Video,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown section kind `{0}`")]
pub struct UnknownSectionKind(pub String);

impl SectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Text => "text",
            SectionKind::Image => "image",
            SectionKind::Code => "code",
            SectionKind::Video => "video",
        }
    }

    /// Whether `content` is the authoritative payload field for this kind.
    pub fn uses_content(self) -> bool {
        matches!(self, SectionKind::Text | SectionKind::Code)
    }

    /// Whether `src` is the authoritative payload field for this kind.
    pub fn uses_src(self) -> bool {
        matches!(self, SectionKind::Image | SectionKind::Video)
    }
}

impl FromStr for SectionKind {
    type Err = UnknownSectionKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "text" => Ok(SectionKind::Text),
            "image" => Ok(SectionKind::Image),
            "code" => Ok(SectionKind::Code),
            "video" => Ok(SectionKind::Video),
            other => Err(UnknownSectionKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in [
            SectionKind::Text,
            SectionKind::Image,
            SectionKind::Code,
            SectionKind::Video,
        ] {
            assert_eq!(kind.as_str().parse::<SectionKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = "gif".parse::<SectionKind>().expect_err("unknown kind");
        assert_eq!(err, UnknownSectionKind("gif".to_string()));
    }

    #[test]
    fn payload_field_is_determined_by_kind() {
        assert!(SectionKind::Text.uses_content());
        assert!(SectionKind::Code.uses_content());
        assert!(SectionKind::Image.uses_src());
        assert!(SectionKind::Video.uses_src());
    }
}
