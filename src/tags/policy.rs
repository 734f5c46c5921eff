//! Validation rules for tag candidates.

use std::num::NonZeroUsize;

use crate::core::text::width::grapheme_len;
use crate::error::TagError;

/// Pure rule set consulted by [`TagCollection`](super::TagCollection).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub max_tags: Option<NonZeroUsize>,
    pub max_length: Option<NonZeroUsize>,
    pub allow_duplicates: bool,
}

impl ValidationPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_tags(mut self, max_tags: Option<NonZeroUsize>) -> Self {
        self.max_tags = max_tags;
        self
    }

    pub fn with_max_length(mut self, max_length: Option<NonZeroUsize>) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_allow_duplicates(mut self, allow_duplicates: bool) -> Self {
        self.allow_duplicates = allow_duplicates;
        self
    }

    /// Validates `candidate` against `existing` and returns the trimmed tag to store.
    ///
    /// Checks run in a fixed order: empty, length, duplicate, count.
    pub fn check(&self, candidate: &str, existing: &[String]) -> Result<String, TagError> {
        let tag = candidate.trim();
        if tag.is_empty() {
            return Err(TagError::EmptyInput);
        }

        if let Some(max) = self.max_length {
            let length = grapheme_len(tag);
            if length > max.get() {
                return Err(TagError::MaxLengthExceeded {
                    length,
                    max: max.get(),
                });
            }
        }

        if !self.allow_duplicates && existing.iter().any(|current| current == tag) {
            return Err(TagError::DuplicateTag {
                tag: tag.to_string(),
            });
        }

        if let Some(max) = self.max_tags {
            if existing.len() >= max.get() {
                return Err(TagError::MaxTagsReached { max: max.get() });
            }
        }

        Ok(tag.to_string())
    }

    /// Whether `count` tags leave no free slot.
    pub fn is_full(&self, count: usize) -> bool {
        self.max_tags.is_some_and(|max| count >= max.get())
    }

    /// Whether `length` grapheme clusters fit in a tag.
    pub fn fits_length(&self, length: usize) -> bool {
        self.max_length.map_or(true, |max| length <= max.get())
    }
}
