//! Ordered collection of committed tags.

use crate::error::TagError;

use super::policy::ValidationPolicy;

/// Committed tags in insertion order.
///
/// All additions go through [`ValidationPolicy::check`], so the count and uniqueness rules hold
/// for everything added here. Values passed to [`TagCollection::from_values`] are mirrored as
/// given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCollection {
    tags: Vec<String>,
}

impl TagCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: Vec<String>) -> Self {
        Self { tags: values }
    }

    /// Validates and appends `candidate`, returning the stored (trimmed) tag.
    pub fn add(&mut self, candidate: &str, policy: &ValidationPolicy) -> Result<String, TagError> {
        let tag = policy.check(candidate, &self.tags)?;
        self.tags.push(tag.clone());
        Ok(tag)
    }

    /// Removes the tag at `index`; out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        if index < self.tags.len() {
            Some(self.tags.remove(index))
        } else {
            None
        }
    }

    pub fn remove_last(&mut self) -> Option<String> {
        self.tags.pop()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|current| current == tag)
    }

    pub fn is_full(&self, policy: &ValidationPolicy) -> bool {
        policy.is_full(self.tags.len())
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.tags.clone()
    }
}
