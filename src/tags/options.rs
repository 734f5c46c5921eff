//! Configuration surface of a tags input field.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

use super::policy::ValidationPolicy;
use super::suggestions::DEFAULT_SUGGESTION_LIMIT;

/// Frame style of the field. Rendering only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Default,
    Enterprise,
    Minimal,
}

/// Chip style of committed tags. Rendering only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagVariant {
    #[default]
    Default,
    Secondary,
    Outline,
    Destructive,
}

fn default_suggestion_limit() -> usize {
    DEFAULT_SUGGESTION_LIMIT
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagsInputOptions {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Noun shown next to the tag counter; the label is used when absent.
    #[serde(default)]
    pub beautify_name: Option<String>,
    #[serde(default)]
    pub max_tags: Option<NonZeroUsize>,
    #[serde(default)]
    pub max_length: Option<NonZeroUsize>,
    #[serde(default)]
    pub allow_duplicates: bool,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    #[serde(default)]
    pub variant: Variant,
    #[serde(default)]
    pub tag_variant: TagVariant,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub auto_focus: bool,
    #[serde(default)]
    pub start_icon: Option<String>,
    #[serde(default)]
    pub end_icon: Option<String>,
}

impl TagsInputOptions {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            description: None,
            placeholder: None,
            beautify_name: None,
            max_tags: None,
            max_length: None,
            allow_duplicates: false,
            suggestions: Vec::new(),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            variant: Variant::Default,
            tag_variant: TagVariant::Default,
            disabled: false,
            auto_focus: false,
            start_icon: None,
            end_icon: None,
        }
    }

    /// Parses options from JSON with camelCase keys (`maxTags`, `beautifyName`, ...).
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Self =
            serde_json::from_str(json).map_err(|source| OptionsError::Json { source })?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.name.trim().is_empty() {
            return Err(OptionsError::MissingName);
        }
        if self.label.trim().is_empty() {
            return Err(OptionsError::MissingLabel);
        }
        if self.suggestion_limit == 0 {
            return Err(OptionsError::ZeroSuggestionLimit);
        }
        Ok(())
    }

    pub fn policy(&self) -> ValidationPolicy {
        ValidationPolicy::new()
            .with_max_tags(self.max_tags)
            .with_max_length(self.max_length)
            .with_allow_duplicates(self.allow_duplicates)
    }

    /// Noun for the counter line.
    pub fn counter_noun(&self) -> &str {
        self.beautify_name.as_deref().unwrap_or(&self.label)
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn beautify_name(mut self, beautify_name: impl Into<String>) -> Self {
        self.beautify_name = Some(beautify_name.into());
        self
    }

    /// Zero means unbounded.
    pub fn max_tags(mut self, max_tags: usize) -> Self {
        self.max_tags = NonZeroUsize::new(max_tags);
        self
    }

    /// Zero means unbounded.
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = NonZeroUsize::new(max_length);
        self
    }

    pub fn allow_duplicates(mut self, allow_duplicates: bool) -> Self {
        self.allow_duplicates = allow_duplicates;
        self
    }

    pub fn suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }

    pub fn suggestion_limit(mut self, suggestion_limit: usize) -> Self {
        self.suggestion_limit = suggestion_limit;
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn tag_variant(mut self, tag_variant: TagVariant) -> Self {
        self.tag_variant = tag_variant;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn auto_focus(mut self, auto_focus: bool) -> Self {
        self.auto_focus = auto_focus;
        self
    }

    pub fn start_icon(mut self, icon: impl Into<String>) -> Self {
        self.start_icon = Some(icon.into());
        self
    }

    pub fn end_icon(mut self, icon: impl Into<String>) -> Self {
        self.end_icon = Some(icon.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use assert_matches::assert_matches;

    use super::{TagVariant, TagsInputOptions, Variant};
    use crate::error::OptionsError;

    #[test]
    fn json_uses_camel_case_props() {
        let options = TagsInputOptions::from_json(
            r#"{
                "name": "technologies",
                "label": "Technologies",
                "maxTags": 8,
                "maxLength": 15,
                "tagVariant": "secondary",
                "variant": "enterprise",
                "suggestions": ["React", "Next.js"]
            }"#,
        )
        .expect("valid options");

        assert_eq!(options.max_tags, NonZeroUsize::new(8));
        assert_eq!(options.max_length, NonZeroUsize::new(15));
        assert_eq!(options.tag_variant, TagVariant::Secondary);
        assert_eq!(options.variant, Variant::Enterprise);
        assert!(!options.allow_duplicates);
        assert_eq!(options.suggestion_limit, 8);
        assert_eq!(options.counter_noun(), "Technologies");
    }

    #[test]
    fn zero_limits_are_rejected_by_json() {
        let err = TagsInputOptions::from_json(r#"{"name":"a","label":"A","maxTags":0}"#)
            .expect_err("zero maxTags");
        assert_matches!(err, OptionsError::Json { .. });
    }

    #[test]
    fn blank_identity_is_rejected() {
        assert_matches!(
            TagsInputOptions::new(" ", "Skills").validate(),
            Err(OptionsError::MissingName)
        );
        assert_matches!(
            TagsInputOptions::new("skills", "").validate(),
            Err(OptionsError::MissingLabel)
        );
        assert_matches!(
            TagsInputOptions::new("skills", "Skills")
                .suggestion_limit(0)
                .validate(),
            Err(OptionsError::ZeroSuggestionLimit)
        );
    }

    #[test]
    fn builder_maps_zero_to_unbounded() {
        let options = TagsInputOptions::new("skills", "Skills")
            .max_tags(0)
            .max_length(20)
            .beautify_name("skills");
        assert_eq!(options.max_tags, None);
        assert_eq!(options.policy().max_length, NonZeroUsize::new(20));
        assert_eq!(options.counter_noun(), "skills");
    }
}
