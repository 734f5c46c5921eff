//! Replays an escaped input script through a tags input and reports the result.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tags_input::{
    default_keybindings_handle, parse_input_events, Component, EnvConfig, FieldState, Focusable,
    MemoryForm, TagsField, TagsInput, TagsInputOptions, TagsInputTheme,
};

pub const DEFAULT_WIDTH: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub frame: Vec<String>,
    pub state: FieldState,
}

/// Reads options from a JSON file, applying environment overrides.
pub fn load_options(path: &Path, env: &EnvConfig) -> Result<TagsInputOptions> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read options from {}", path.display()))?;
    let options = TagsInputOptions::from_json(&json)
        .with_context(|| format!("invalid options in {}", path.display()))?;
    Ok(env.apply(options))
}

/// Feeds `script` (already unescaped) to a focused field and renders the final frame.
pub fn replay(options: TagsInputOptions, script: &str, width: usize) -> Result<ReplayReport> {
    let form = MemoryForm::new();
    let binding = form.register(options.name.clone(), Vec::new(), Vec::new());
    let field = TagsField::new(options, binding).context("invalid options")?;
    let mut widget = TagsInput::new(field, default_keybindings_handle(), TagsInputTheme::plain());
    widget.set_focused(true);

    let events = parse_input_events(script);
    tracing::debug!(events = events.len(), "replaying script");
    for event in &events {
        widget.handle_event(event);
    }

    Ok(ReplayReport {
        frame: widget.render(width),
        state: widget.field().field_state(),
    })
}

/// Expands `\r`, `\n`, `\t`, `\\`, and `\xNN` escapes.
pub fn unescape(input: &str) -> String {
    let mut out = String::new();
    let mut iter = input.chars();

    while let Some(ch) = iter.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match iter.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('e') => out.push('\x1b'),
            Some('\\') => out.push('\\'),
            Some('x') => {
                let digits: String = iter.by_ref().take(2).collect();
                match u8::from_str_radix(&digits, 16) {
                    Ok(byte) => out.push(byte as char),
                    Err(_) => {
                        out.push_str("\\x");
                        out.push_str(&digits);
                    }
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}
