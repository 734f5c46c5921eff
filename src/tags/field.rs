//! The tags input engine: buffer, collection, suggestions, and form sync in one place.

use serde::Serialize;

use crate::core::input_event::InputEvent;
use crate::core::keybindings::KeybindingsManager;
use crate::error::{OptionsError, TagError};

use super::binding::FormBinding;
use super::buffer::InputBuffer;
use super::collection::TagCollection;
use super::options::TagsInputOptions;
use super::policy::ValidationPolicy;
use super::router::{Intent, KeyEventRouter, RouterState};
use super::suggestions::SuggestionEngine;

/// Character that commits the buffer when typed, and splits pasted text.
pub const TAG_SEPARATOR: char = ',';

fn is_paste_separator(ch: char) -> bool {
    ch == TAG_SEPARATOR || ch == '\n' || ch == '\r'
}

/// Externally visible projection of the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldState {
    pub tags: Vec<String>,
    pub error: Option<String>,
}

/// Result of one commit: tags that were added and candidates that were turned away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitOutcome {
    pub added: Vec<String>,
    pub rejected: Vec<(String, TagError)>,
}

impl CommitOutcome {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.rejected.is_empty()
    }

    fn record(&mut self, candidate: &str, result: Result<String, TagError>) {
        match result {
            Ok(tag) => self.added.push(tag),
            Err(err) => self.rejected.push((candidate.to_string(), err)),
        }
    }

    fn merge(&mut self, other: CommitOutcome) {
        self.added.extend(other.added);
        self.rejected.extend(other.rejected);
    }
}

/// Interaction engine for one tags input field.
///
/// Owns the committed tags exclusively and mirrors them into the form through `B` after every
/// successful mutation. Events are handled one at a time, to completion.
pub struct TagsField<B: FormBinding> {
    options: TagsInputOptions,
    policy: ValidationPolicy,
    tags: TagCollection,
    buffer: InputBuffer,
    engine: SuggestionEngine,
    visible: Vec<String>,
    router: KeyEventRouter,
    binding: B,
    error: Option<String>,
    focused: bool,
}

impl<B: FormBinding> TagsField<B> {
    /// Builds the field and loads its initial tags from the binding's current value.
    pub fn new(options: TagsInputOptions, binding: B) -> Result<Self, OptionsError> {
        options.validate()?;

        let policy = options.policy();
        let engine = SuggestionEngine::new(
            options.suggestions.clone(),
            options.suggestion_limit,
            options.allow_duplicates,
        );
        let buffer = InputBuffer::new(options.max_length.map(|max| max.get()));
        let focused = options.auto_focus && !options.disabled;

        let mut field = Self {
            options,
            policy,
            tags: TagCollection::new(),
            buffer,
            engine,
            visible: Vec::new(),
            router: KeyEventRouter::new(),
            binding,
            error: None,
            focused,
        };
        field.reload();
        Ok(field)
    }

    /// Re-reads the tags from the binding, for example after the form was reset.
    pub fn reload(&mut self) {
        let initial = self.binding.read();
        if self.policy.max_tags.is_some_and(|max| initial.len() > max.get()) {
            tracing::warn!(
                field = %self.options.name,
                count = initial.len(),
                "initial value holds more tags than allowed"
            );
        }
        self.tags = TagCollection::from_values(initial);
        self.buffer.clear();
        self.refresh(true);
    }

    pub fn options(&self) -> &TagsInputOptions {
        &self.options
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    pub fn tags(&self) -> &[String] {
        self.tags.as_slice()
    }

    pub fn buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    /// Suggestions currently offered, empty unless the dropdown is shown.
    pub fn suggestions(&self) -> &[String] {
        match self.router.state() {
            RouterState::Suggesting => &self.visible,
            RouterState::Idle => &[],
        }
    }

    pub fn state(&self) -> RouterState {
        self.router.state()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.router.highlighted()
    }

    /// Validation message supplied by the form, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Re-reads the validation message from the form.
    pub fn refresh_error(&mut self) {
        self.error = self.binding.error();
    }

    pub fn field_state(&self) -> FieldState {
        FieldState {
            tags: self.tags.to_vec(),
            error: self.error.clone(),
        }
    }

    pub fn binding(&self) -> &B {
        &self.binding
    }

    pub fn binding_mut(&mut self) -> &mut B {
        &mut self.binding
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        if focused {
            self.focused = !self.options.disabled;
        } else {
            self.blur();
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.options.disabled
    }

    /// Whether no further tag can be added.
    pub fn is_full(&self) -> bool {
        self.tags.is_full(&self.policy)
    }

    /// Validates and appends `candidate`.
    pub fn add(&mut self, candidate: &str) -> Result<String, TagError> {
        let result = self.add_quiet(candidate);
        self.refresh(false);
        result
    }

    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        let removed = self.tags.remove_at(index);
        if let Some(tag) = &removed {
            tracing::debug!(field = %self.options.name, tag = %tag, index, "tag removed");
            self.sync();
        }
        self.refresh(false);
        removed
    }

    pub fn remove_last(&mut self) -> Option<String> {
        let removed = self.tags.remove_last();
        if let Some(tag) = &removed {
            tracing::debug!(field = %self.options.name, tag = %tag, "last tag removed");
            self.sync();
        }
        self.refresh(false);
        removed
    }

    /// Commits the whole buffer as one tag.
    ///
    /// The buffer is kept when the tag was a duplicate or too long so it can be edited, and
    /// cleared otherwise (including when the collection is full).
    pub fn commit_buffer(&mut self) -> CommitOutcome {
        let outcome = self.commit_buffer_quiet();
        self.refresh(true);
        outcome
    }

    /// Handles typed text. Each separator commits what precedes it.
    pub fn type_text(&mut self, text: &str) -> CommitOutcome {
        let mut outcome = CommitOutcome::default();
        let mut segments = text.split(TAG_SEPARATOR).peekable();
        while let Some(segment) = segments.next() {
            self.buffer.insert(segment);
            if segments.peek().is_some() {
                outcome.merge(self.commit_buffer_quiet());
            }
        }
        self.refresh(true);
        outcome
    }

    /// Handles pasted text.
    ///
    /// Text without separators is inserted into the buffer. Otherwise the buffer and the pasted
    /// text are split into tokens, each added independently, and the buffer is cleared.
    pub fn commit_paste(&mut self, text: &str) -> CommitOutcome {
        let mut outcome = CommitOutcome::default();

        if !text.contains(is_paste_separator) {
            self.buffer.insert(text);
            self.refresh(true);
            return outcome;
        }

        let cursor = self.buffer.cursor();
        let current = self.buffer.take();
        let combined = format!("{}{}{}", &current[..cursor], text, &current[cursor..]);

        for token in combined.split(is_paste_separator) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let result = self.add_quiet(token);
            outcome.record(token, result);
        }

        tracing::debug!(
            field = %self.options.name,
            added = outcome.added.len(),
            rejected = outcome.rejected.len(),
            "paste committed"
        );
        self.refresh(true);
        outcome
    }

    /// Commits the visible suggestion at `index` exactly as listed.
    ///
    /// Returns `None` when nothing is listed at `index`.
    pub fn select_suggestion(&mut self, index: usize) -> Option<Result<String, TagError>> {
        let candidate = self.suggestions().get(index)?.clone();
        let result = self.add_quiet(&candidate);
        match &result {
            Err(err) if err.retains_buffer() => {}
            _ => self.buffer.clear(),
        }
        self.refresh(true);
        Some(result)
    }

    /// Closes the dropdown without touching tags or buffer.
    pub fn dismiss(&mut self) {
        self.router.dismiss();
    }

    pub fn blur(&mut self) {
        self.focused = false;
        self.router.dismiss();
    }

    /// Routes one input event. Returns whether the event was consumed.
    pub fn handle_event(&mut self, event: &InputEvent, keybindings: &KeybindingsManager) -> bool {
        if self.options.disabled {
            return false;
        }
        match self.router.route(event, keybindings) {
            Some(intent) => {
                self.apply(intent);
                true
            }
            None => false,
        }
    }

    /// Applies one intent. Disabled fields ignore everything.
    pub fn apply(&mut self, intent: Intent) {
        if self.options.disabled {
            return;
        }

        match intent {
            Intent::Insert(text) => {
                self.type_text(&text);
            }
            Intent::Paste(text) => {
                self.commit_paste(&text);
            }
            Intent::Commit => {
                self.commit_buffer();
            }
            Intent::Select(index) => {
                self.select_suggestion(index);
            }
            Intent::Backspace => {
                if self.buffer.is_empty() {
                    self.remove_last();
                } else {
                    self.edit(InputBuffer::delete_backward);
                }
            }
            Intent::DeleteForward => self.edit(InputBuffer::delete_forward),
            Intent::DeleteWordBackward => self.edit(InputBuffer::delete_word_backward),
            Intent::DeleteToStart => self.edit(InputBuffer::delete_to_start),
            Intent::DeleteToEnd => self.edit(InputBuffer::delete_to_end),
            Intent::CursorLeft => self.buffer.move_left(),
            Intent::CursorRight => self.buffer.move_right(),
            Intent::CursorStart => self.buffer.move_to_start(),
            Intent::CursorEnd => self.buffer.move_to_end(),
            Intent::HighlightNext => self.router.highlight_next(self.visible.len()),
            Intent::HighlightPrevious => self.router.highlight_previous(self.visible.len()),
            Intent::Dismiss => self.dismiss(),
            Intent::Focus => self.focused = true,
            Intent::Blur => self.blur(),
        }
    }

    fn edit(&mut self, op: fn(&mut InputBuffer) -> bool) {
        let changed = op(&mut self.buffer);
        self.refresh(changed);
    }

    fn add_quiet(&mut self, candidate: &str) -> Result<String, TagError> {
        match self.tags.add(candidate, &self.policy) {
            Ok(tag) => {
                tracing::debug!(field = %self.options.name, tag = %tag, "tag added");
                self.sync();
                Ok(tag)
            }
            Err(err) => {
                tracing::debug!(field = %self.options.name, error = %err, "tag rejected");
                Err(err)
            }
        }
    }

    fn commit_buffer_quiet(&mut self) -> CommitOutcome {
        let mut outcome = CommitOutcome::default();
        let candidate = self.buffer.as_str().to_string();
        let result = self.add_quiet(&candidate);

        match &result {
            Err(TagError::EmptyInput) => {
                self.buffer.clear();
                return outcome;
            }
            Err(err) if err.retains_buffer() => {}
            _ => self.buffer.clear(),
        }
        outcome.record(&candidate, result);
        outcome
    }

    fn sync(&mut self) {
        self.binding.write(self.tags.as_slice());
    }

    fn refresh(&mut self, buffer_changed: bool) {
        self.visible = self
            .engine
            .recompute(self.buffer.as_str(), self.tags.as_slice());
        self.router
            .settle(buffer_changed, self.buffer.is_empty(), self.visible.len());
        self.refresh_error();
    }
}
