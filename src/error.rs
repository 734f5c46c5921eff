//! Error types.

use thiserror::Error;

/// Why a candidate was not added to the tag collection.
///
/// Every variant is recoverable: the engine reports it and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("tag is empty")]
    EmptyInput,

    #[error("tag '{tag}' is already present")]
    DuplicateTag { tag: String },

    #[error("tag is {length} characters long; the limit is {max}")]
    MaxLengthExceeded { length: usize, max: usize },

    #[error("no more than {max} tags are allowed")]
    MaxTagsReached { max: usize },
}

impl TagError {
    /// Whether the buffer keeps its text after a single-token commit fails with this error.
    pub fn retains_buffer(&self) -> bool {
        matches!(
            self,
            TagError::DuplicateTag { .. } | TagError::MaxLengthExceeded { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("field name must not be blank")]
    MissingName,

    #[error("field label must not be blank")]
    MissingLabel,

    #[error("suggestion limit must be at least 1")]
    ZeroSuggestionLimit,

    #[error("failed to parse tags input options: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter '{directive}': {source}")]
    InvalidFilter {
        directive: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
}

#[cfg(test)]
mod tests {
    use super::TagError;

    #[test]
    fn only_editable_rejections_retain_the_buffer() {
        assert!(TagError::DuplicateTag { tag: "a".into() }.retains_buffer());
        assert!(TagError::MaxLengthExceeded { length: 5, max: 3 }.retains_buffer());
        assert!(!TagError::MaxTagsReached { max: 2 }.retains_buffer());
        assert!(!TagError::EmptyInput.retains_buffer());
    }

    #[test]
    fn messages_name_the_limit() {
        assert_eq!(
            TagError::MaxTagsReached { max: 10 }.to_string(),
            "no more than 10 tags are allowed"
        );
        assert_eq!(
            TagError::DuplicateTag { tag: "Rust".into() }.to_string(),
            "tag 'Rust' is already present"
        );
    }
}
