//! Authoring draft: an ordered, growable post under composition.
//!
//! The draft is a plain value. Section edits rebuild the list with one entry
//! replaced instead of mutating in place, so sibling entries and overall
//! order can be asserted untouched. Submission serializes the draft verbatim:
//! field values and section order exactly as arranged.

use thiserror::Error;

use crate::application::posts::{CreatePostCommand, SectionSubmission};
use crate::domain::types::{SectionKind, UnknownSectionKind};

#[derive(Debug, Clone, PartialEq)]
pub struct SectionDraft {
    pub kind: SectionKind,
    pub content: String,
    pub src: String,
}

impl Default for SectionDraft {
    fn default() -> Self {
        Self {
            kind: SectionKind::Text,
            content: String::new(),
            src: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub sections: Vec<SectionDraft>,
}

impl Default for PostDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            description: String::new(),
            image: String::new(),
            category: String::new(),
            // A fresh draft starts with one empty text section.
            sections: vec![SectionDraft::default()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionField {
    Kind,
    Content,
    Src,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("no section at index {0}")]
    NoSuchSection(usize),
    #[error(transparent)]
    UnknownKind(#[from] UnknownSectionKind),
}

impl PostDraft {
    /// Appends one default text section at the end of the list.
    pub fn add_section(&mut self) {
        self.sections.push(SectionDraft::default());
    }

    /// Replaces one field of the section at `index`, leaving every sibling
    /// untouched and the order unchanged.
    pub fn update_section(
        &mut self,
        index: usize,
        field: SectionField,
        value: &str,
    ) -> Result<(), DraftError> {
        if index >= self.sections.len() {
            return Err(DraftError::NoSuchSection(index));
        }

        let mut updated = self.sections[index].clone();
        match field {
            SectionField::Kind => updated.kind = value.parse()?,
            SectionField::Content => updated.content = value.to_string(),
            SectionField::Src => updated.src = value.to_string(),
        }

        self.sections = self
            .sections
            .iter()
            .enumerate()
            .map(|(i, existing)| {
                if i == index {
                    updated.clone()
                } else {
                    existing.clone()
                }
            })
            .collect();
        Ok(())
    }

    /// Serializes the current draft state verbatim for submission.
    pub fn to_command(&self) -> CreatePostCommand {
        CreatePostCommand {
            title: Some(self.title.clone()),
            content: Some(self.content.clone()),
            description: Some(self.description.clone()),
            image: Some(self.image.clone()),
            category: Some(self.category.clone()),
            content_sections: self
                .sections
                .iter()
                .map(|section| SectionSubmission {
                    kind: Some(section.kind.as_str().to_string()),
                    content: Some(section.content.clone()),
                    src: Some(section.src.clone()),
                })
                .collect(),
        }
    }
}
