//! Tags input field for terminal forms.
//!
//! Invariant: the tag sequence never holds more than `max_tags` entries and, unless duplicates
//! are allowed, never holds the same tag twice.
//!
//! # Public API Overview
//! - Configure a field with [`TagsInputOptions`] and connect it to a form via [`FormBinding`]
//!   ([`MemoryForm`] is the in-memory host).
//! - Drive the engine ([`TagsField`]) with [`InputEvent`]s decoded by [`parse_input_events`].
//! - Paint it with the [`TagsInput`] widget, which implements [`Component`].
//! - Use text and width helpers for ANSI-safe formatting.

#![allow(
    clippy::derivable_impls,
    clippy::new_without_default,
    clippy::type_complexity
)]

pub mod config;
pub mod error;
pub mod logging;

pub mod core;
pub mod tags;
pub mod widgets;

/// Error types.
pub use crate::error::{LoggingError, OptionsError, TagError};

/// Environment configuration and logging setup.
pub use crate::config::EnvConfig;
pub use crate::logging::init_logging;

/// Tags engine types.
pub use crate::tags::{
    CommitOutcome, FieldRule, FieldState, FormBinding, FormErrors, FormValues, Intent,
    KeyEventRouter, MemoryFieldBinding, MemoryForm, RouterState, TagVariant, TagsField,
    TagsInputOptions, ValidationPolicy, Variant, DEFAULT_SUGGESTION_LIMIT, TAG_SEPARATOR,
};

/// Built-in UI components.
pub use crate::widgets::{SuggestionList, SuggestionListTheme, TagsInput, TagsInputTheme};

/// Keybinding configuration and default mappings.
pub use crate::core::keybindings::{
    default_keybindings_handle, KeyBinding, KeyId, KeybindingsConfig, KeybindingsHandle,
    KeybindingsManager, TagsAction, DEFAULT_TAGS_KEYBINDINGS,
};

/// Keyboard input parsing and matching helpers.
pub use crate::core::input::{matches_key, normalize_key_id, parse_key};
pub use crate::core::input_event::{parse_input_events, InputEvent};

/// Component traits.
pub use crate::core::component::{Component, CursorPos, Focusable};

/// Returns whether a component exposes focus behavior via [`Focusable`].
pub fn is_focusable(component: &mut dyn Component) -> bool {
    component.as_focusable().is_some()
}

/// ANSI-aware truncation helper.
pub use crate::core::text::utils::truncate_to_width;
/// Visible width helper that ignores ANSI control sequences.
pub use crate::core::text::width::{grapheme_len, visible_width};
