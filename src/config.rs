//! Environment configuration.

use std::env;

use crate::tags::TagsInputOptions;

#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// `TAGS_INPUT_DEBUG=1` raises the default log level for this crate to `debug`.
    pub debug: bool,
    /// `TAGS_INPUT_LOG` overrides the log filter directive entirely.
    pub log_filter: Option<String>,
    /// `TAGS_INPUT_LOG_JSON=1` emits JSON log lines.
    pub log_json: bool,
    /// `TAGS_INPUT_SUGGESTION_LIMIT` caps the suggestion dropdown for every field.
    pub suggestion_limit: Option<usize>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            debug: env_flag("TAGS_INPUT_DEBUG"),
            log_filter: env_string_opt("TAGS_INPUT_LOG"),
            log_json: env_flag("TAGS_INPUT_LOG_JSON"),
            suggestion_limit: env_string_opt("TAGS_INPUT_SUGGESTION_LIMIT")
                .and_then(|value| value.trim().parse::<usize>().ok())
                .filter(|limit| *limit > 0),
        }
    }

    /// Applies environment overrides to widget options.
    pub fn apply(&self, mut options: TagsInputOptions) -> TagsInputOptions {
        if let Some(limit) = self.suggestion_limit {
            options.suggestion_limit = limit;
        }
        options
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
