//! Tags input keybindings.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

use crate::core::input::{normalize_key_id, parse_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagsAction {
    /// Commit the buffer, or the highlighted suggestion when one is highlighted.
    Commit,
    /// Close the suggestion dropdown.
    Dismiss,
    /// Leave the field.
    Blur,
    HighlightNext,
    HighlightPrevious,
    DeleteCharBackward,
    DeleteCharForward,
    DeleteWordBackward,
    DeleteToLineStart,
    DeleteToLineEnd,
    CursorLeft,
    CursorRight,
    CursorLineStart,
    CursorLineEnd,
}

pub type KeyId = String;

#[derive(Debug, Clone)]
pub enum KeyBinding {
    Single(KeyId),
    Multiple(Vec<KeyId>),
}

impl From<&str> for KeyBinding {
    fn from(value: &str) -> Self {
        KeyBinding::Single(value.to_string())
    }
}

impl From<String> for KeyBinding {
    fn from(value: String) -> Self {
        KeyBinding::Single(value)
    }
}

impl From<Vec<&str>> for KeyBinding {
    fn from(value: Vec<&str>) -> Self {
        KeyBinding::Multiple(value.into_iter().map(|item| item.to_string()).collect())
    }
}

impl From<Vec<String>> for KeyBinding {
    fn from(value: Vec<String>) -> Self {
        KeyBinding::Multiple(value)
    }
}

/// Overrides applied on top of [`DEFAULT_TAGS_KEYBINDINGS`].
#[derive(Debug, Clone, Default)]
pub struct KeybindingsConfig {
    entries: HashMap<TagsAction, KeyBinding>,
}

impl KeybindingsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<K: Into<KeyBinding>>(&mut self, action: TagsAction, keys: K) {
        self.entries.insert(action, keys.into());
    }
}

pub static DEFAULT_TAGS_KEYBINDINGS: Lazy<HashMap<TagsAction, Vec<KeyId>>> = Lazy::new(|| {
    use TagsAction::*;

    let bind = |keys: &[&str]| keys.iter().map(|key| key.to_string()).collect::<Vec<_>>();

    let mut map = HashMap::new();
    map.insert(Commit, bind(&["enter"]));
    map.insert(Dismiss, bind(&["escape"]));
    map.insert(Blur, bind(&["tab", "shift+tab"]));
    map.insert(HighlightNext, bind(&["down", "ctrl+n"]));
    map.insert(HighlightPrevious, bind(&["up", "ctrl+p"]));
    map.insert(DeleteCharBackward, bind(&["backspace"]));
    map.insert(DeleteCharForward, bind(&["delete", "ctrl+d"]));
    map.insert(DeleteWordBackward, bind(&["ctrl+w", "alt+backspace"]));
    map.insert(DeleteToLineStart, bind(&["ctrl+u"]));
    map.insert(DeleteToLineEnd, bind(&["ctrl+k"]));
    map.insert(CursorLeft, bind(&["left", "ctrl+b"]));
    map.insert(CursorRight, bind(&["right", "ctrl+f"]));
    map.insert(CursorLineStart, bind(&["home", "ctrl+a"]));
    map.insert(CursorLineEnd, bind(&["end", "ctrl+e"]));
    map
});

/// Resolves key ids to actions.
pub struct KeybindingsManager {
    action_to_keys: HashMap<TagsAction, Vec<KeyId>>,
}

impl KeybindingsManager {
    pub fn new(config: KeybindingsConfig) -> Self {
        let mut manager = Self {
            action_to_keys: HashMap::new(),
        };
        manager.build_maps(&config);
        manager
    }

    fn build_maps(&mut self, config: &KeybindingsConfig) {
        self.action_to_keys.clear();

        for (action, keys) in DEFAULT_TAGS_KEYBINDINGS.iter() {
            self.action_to_keys.insert(*action, normalized(keys));
        }

        for (action, binding) in config.entries.iter() {
            let key_list = match binding {
                KeyBinding::Single(key) => vec![key.clone()],
                KeyBinding::Multiple(keys) => keys.clone(),
            };
            self.action_to_keys.insert(*action, normalized(&key_list));
        }
    }

    /// Whether an already-normalized key id triggers `action`.
    pub fn matches(&self, key_id: &str, action: TagsAction) -> bool {
        let Some(key_id) = normalize_key_id(key_id) else {
            return false;
        };
        self.action_to_keys
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|key| *key == key_id))
    }

    /// Whether raw terminal input triggers `action`.
    pub fn matches_raw(&self, data: &str, action: TagsAction) -> bool {
        parse_key(data).is_some_and(|key_id| self.matches(&key_id, action))
    }

    /// First action bound to `key_id`, in declaration order of [`TagsAction`].
    pub fn action_for(&self, key_id: &str) -> Option<TagsAction> {
        use TagsAction::*;
        [
            Commit,
            Dismiss,
            Blur,
            HighlightNext,
            HighlightPrevious,
            DeleteCharBackward,
            DeleteCharForward,
            DeleteWordBackward,
            DeleteToLineStart,
            DeleteToLineEnd,
            CursorLeft,
            CursorRight,
            CursorLineStart,
            CursorLineEnd,
        ]
        .into_iter()
        .find(|action| self.matches(key_id, *action))
    }

    pub fn get_keys(&self, action: TagsAction) -> Vec<KeyId> {
        self.action_to_keys.get(&action).cloned().unwrap_or_default()
    }

    pub fn set_config(&mut self, config: KeybindingsConfig) {
        self.build_maps(&config);
    }
}

fn normalized(keys: &[KeyId]) -> Vec<KeyId> {
    keys.iter().filter_map(|key| normalize_key_id(key)).collect()
}

pub type KeybindingsHandle = Arc<Mutex<KeybindingsManager>>;

pub fn default_keybindings_handle() -> KeybindingsHandle {
    Arc::new(Mutex::new(KeybindingsManager::new(
        KeybindingsConfig::default(),
    )))
}
