//! Structured input events decoded from raw terminal input.

use crate::core::input::{parse_key, parse_text, FOCUS_IN, FOCUS_OUT};

const ESC: char = '\x1b';
const PASTE_START: &str = "\x1b[200~";
const PASTE_END: &str = "\x1b[201~";

/// Input event delivered to components.
///
/// Notes:
/// - `raw` is the exact sequence received from the terminal.
/// - `key_id` is the normalized identifier used for keybinding matching.
/// - Text and paste events carry decoded text so widgets don't have to parse escape sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key { raw: String, key_id: String },
    Text { raw: String, text: String },
    Paste { raw: String, text: String },
    Focus { focused: bool },
    UnknownRaw { raw: String },
}

impl InputEvent {
    pub fn key(key_id: impl Into<String>) -> Self {
        let key_id = key_id.into();
        InputEvent::Key {
            raw: String::new(),
            key_id,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        InputEvent::Text {
            raw: text.clone(),
            text,
        }
    }

    pub fn paste(text: impl Into<String>) -> Self {
        let text = text.into();
        InputEvent::Paste {
            raw: format!("{PASTE_START}{text}{PASTE_END}"),
            text,
        }
    }
}

/// Splits a chunk of terminal input into events.
///
/// Bracketed paste payloads are kept whole; everything else is split into escape sequences,
/// single control bytes, and runs of printable text.
pub fn parse_input_events(data: &str) -> Vec<InputEvent> {
    let mut events = Vec::new();
    let mut remaining = data;

    while !remaining.is_empty() {
        let Some(start) = remaining.find(PASTE_START) else {
            events.extend(split_sequences(remaining).into_iter().map(classify));
            break;
        };

        events.extend(
            split_sequences(&remaining[..start])
                .into_iter()
                .map(classify),
        );

        let after_start = &remaining[start + PASTE_START.len()..];
        let Some(end_rel) = after_start.find(PASTE_END) else {
            events.push(InputEvent::UnknownRaw {
                raw: remaining[start..].to_string(),
            });
            break;
        };

        let raw_end = start + PASTE_START.len() + end_rel + PASTE_END.len();
        events.push(InputEvent::Paste {
            raw: remaining[start..raw_end].to_string(),
            text: after_start[..end_rel].to_string(),
        });
        remaining = &remaining[raw_end..];
    }

    events
}

fn classify(sequence: &str) -> InputEvent {
    match sequence {
        FOCUS_IN => return InputEvent::Focus { focused: true },
        FOCUS_OUT => return InputEvent::Focus { focused: false },
        _ => {}
    }

    if let Some(text) = parse_text(sequence) {
        return InputEvent::Text {
            raw: sequence.to_string(),
            text,
        };
    }

    if let Some(key_id) = parse_key(sequence) {
        return InputEvent::Key {
            raw: sequence.to_string(),
            key_id,
        };
    }

    InputEvent::UnknownRaw {
        raw: sequence.to_string(),
    }
}

fn split_sequences(data: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut idx = 0;

    while idx < data.len() {
        let rest = &data[idx..];
        let Some(ch) = rest.chars().next() else {
            break;
        };

        let len = if ch == ESC {
            escape_sequence_len(rest)
        } else if ch.is_control() {
            ch.len_utf8()
        } else {
            rest.char_indices()
                .find(|(_, c)| c.is_control())
                .map(|(pos, _)| pos)
                .unwrap_or(rest.len())
        };

        out.push(&rest[..len]);
        idx += len;
    }

    out
}

fn escape_sequence_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    match bytes.get(1) {
        None => 1,
        Some(b'[') => {
            // Legacy `ESC [ [ A` function keys carry a second bracket.
            let mut idx = if bytes.get(2) == Some(&b'[') { 3 } else { 2 };
            while idx < bytes.len() {
                if (0x40..=0x7e).contains(&bytes[idx]) {
                    return idx + 1;
                }
                idx += 1;
            }
            bytes.len()
        }
        // SS3 finals are ASCII; anything else after `ESC O` is alt+O followed by more input.
        Some(b'O') if bytes.get(2).is_some_and(u8::is_ascii) => 3,
        Some(_) => {
            let next = rest[1..].chars().next().map(char::len_utf8).unwrap_or(0);
            1 + next
        }
    }
}
