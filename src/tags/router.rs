//! Event routing and the suggestion dropdown state machine.

use crate::core::input_event::InputEvent;
use crate::core::keybindings::{KeybindingsManager, TagsAction};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RouterState {
    /// Dropdown hidden.
    #[default]
    Idle,
    /// Dropdown visible.
    Suggesting,
}

/// What an input event asks the engine to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Insert(String),
    Paste(String),
    Commit,
    /// Commit the visible suggestion at this index.
    Select(usize),
    /// Delete a character, or the last tag when the buffer is empty.
    Backspace,
    DeleteForward,
    DeleteWordBackward,
    DeleteToStart,
    DeleteToEnd,
    CursorLeft,
    CursorRight,
    CursorStart,
    CursorEnd,
    HighlightNext,
    HighlightPrevious,
    Dismiss,
    Focus,
    Blur,
}

/// Maps events to intents and tracks whether the dropdown is shown.
///
/// The state is never set directly by callers; it is derived by [`KeyEventRouter::settle`] after
/// every handled intent, from the buffer and the current candidate count.
#[derive(Debug, Clone, Default)]
pub struct KeyEventRouter {
    state: RouterState,
    dismissed: bool,
    highlighted: Option<usize>,
}

impl KeyEventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RouterState {
        self.state
    }

    pub fn highlighted(&self) -> Option<usize> {
        match self.state {
            RouterState::Suggesting => self.highlighted,
            RouterState::Idle => None,
        }
    }

    pub fn route(&self, event: &InputEvent, keybindings: &KeybindingsManager) -> Option<Intent> {
        let key_id = match event {
            InputEvent::Text { text, .. } => return Some(Intent::Insert(text.clone())),
            InputEvent::Paste { text, .. } => return Some(Intent::Paste(text.clone())),
            InputEvent::Focus { focused: true } => return Some(Intent::Focus),
            InputEvent::Focus { focused: false } => return Some(Intent::Blur),
            InputEvent::Key { key_id, .. } => key_id.as_str(),
            InputEvent::UnknownRaw { .. } => return None,
        };

        // Terminals report the space bar as a key when modifiers are involved.
        if key_id == "space" {
            return Some(Intent::Insert(" ".to_string()));
        }

        let intent = match keybindings.action_for(key_id)? {
            TagsAction::Commit => match self.highlighted() {
                Some(index) => Intent::Select(index),
                None => Intent::Commit,
            },
            TagsAction::Dismiss => Intent::Dismiss,
            TagsAction::Blur => Intent::Blur,
            TagsAction::HighlightNext => Intent::HighlightNext,
            TagsAction::HighlightPrevious => Intent::HighlightPrevious,
            TagsAction::DeleteCharBackward => Intent::Backspace,
            TagsAction::DeleteCharForward => Intent::DeleteForward,
            TagsAction::DeleteWordBackward => Intent::DeleteWordBackward,
            TagsAction::DeleteToLineStart => Intent::DeleteToStart,
            TagsAction::DeleteToLineEnd => Intent::DeleteToEnd,
            TagsAction::CursorLeft => Intent::CursorLeft,
            TagsAction::CursorRight => Intent::CursorRight,
            TagsAction::CursorLineStart => Intent::CursorStart,
            TagsAction::CursorLineEnd => Intent::CursorEnd,
        };
        tracing::trace!(key = key_id, ?intent, "routed key");
        Some(intent)
    }

    /// Hides the dropdown until the buffer changes again.
    pub fn dismiss(&mut self) {
        self.dismissed = true;
        self.state = RouterState::Idle;
        self.highlighted = None;
    }

    /// Moves the highlight down, wrapping to the top.
    pub fn highlight_next(&mut self, candidates: usize) {
        if self.state != RouterState::Suggesting || candidates == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(index) if index + 1 < candidates => index + 1,
            Some(_) => 0,
            None => 0,
        });
    }

    /// Moves the highlight up, wrapping to the bottom.
    pub fn highlight_previous(&mut self, candidates: usize) {
        if self.state != RouterState::Suggesting || candidates == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(0) | None => candidates - 1,
            Some(index) => index - 1,
        });
    }

    /// Re-derives the state after an intent has been applied.
    pub fn settle(&mut self, buffer_changed: bool, buffer_empty: bool, candidates: usize) -> RouterState {
        if buffer_changed {
            self.dismissed = false;
            self.highlighted = None;
        }

        self.state = if !self.dismissed && !buffer_empty && candidates > 0 {
            RouterState::Suggesting
        } else {
            RouterState::Idle
        };

        match self.state {
            RouterState::Idle => self.highlighted = None,
            RouterState::Suggesting => {
                if self.highlighted.is_some_and(|index| index >= candidates) {
                    self.highlighted = Some(candidates - 1);
                }
            }
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::{Intent, KeyEventRouter, RouterState};
    use crate::core::input_event::{parse_input_events, InputEvent};
    use crate::core::keybindings::{KeybindingsConfig, KeybindingsManager};

    fn keybindings() -> KeybindingsManager {
        KeybindingsManager::new(KeybindingsConfig::default())
    }

    fn route_raw(router: &KeyEventRouter, data: &str) -> Vec<Intent> {
        let keybindings = keybindings();
        parse_input_events(data)
            .iter()
            .filter_map(|event| router.route(event, &keybindings))
            .collect()
    }

    #[test]
    fn events_map_to_intents() {
        let router = KeyEventRouter::new();
        assert_eq!(
            route_raw(&router, "go\r\x7f\x1b"),
            vec![
                Intent::Insert("go".to_string()),
                Intent::Commit,
                Intent::Backspace,
                Intent::Dismiss,
            ]
        );
        assert_eq!(
            route_raw(&router, "\x1b[200~a,b\x1b[201~\t"),
            vec![Intent::Paste("a,b".to_string()), Intent::Blur]
        );
        assert_eq!(route_raw(&router, "\x1b[24~"), Vec::<Intent>::new());
    }

    #[test]
    fn settle_follows_buffer_and_candidates() {
        let mut router = KeyEventRouter::new();
        assert_eq!(router.settle(true, false, 2), RouterState::Suggesting);
        assert_eq!(router.settle(true, false, 0), RouterState::Idle);
        assert_eq!(router.settle(true, true, 3), RouterState::Idle);
    }

    #[test]
    fn dismiss_holds_until_buffer_changes() {
        let mut router = KeyEventRouter::new();
        router.settle(true, false, 2);
        router.dismiss();
        assert_eq!(router.state(), RouterState::Idle);
        assert_eq!(router.settle(false, false, 2), RouterState::Idle);
        assert_eq!(router.settle(true, false, 2), RouterState::Suggesting);
    }

    #[test]
    fn enter_selects_highlighted_candidate() {
        let mut router = KeyEventRouter::new();
        router.settle(true, false, 3);
        router.highlight_previous(3);
        assert_eq!(router.highlighted(), Some(2));
        router.highlight_next(3);
        assert_eq!(router.highlighted(), Some(0));
        router.highlight_next(3);

        let keybindings = keybindings();
        let enter = InputEvent::key("enter");
        assert_eq!(router.route(&enter, &keybindings), Some(Intent::Select(1)));

        router.settle(false, false, 1);
        assert_eq!(router.highlighted(), Some(0));
    }

    #[test]
    fn highlight_is_ignored_while_idle() {
        let mut router = KeyEventRouter::new();
        router.highlight_next(4);
        assert_eq!(router.highlighted(), None);
    }
}
