//! Key parsing for raw terminal input.
//!
//! Decodes legacy VT sequences, control bytes, and CSI-u (`ESC [ code ; mods u`) key reports
//! into normalized key ids such as `enter`, `shift+tab`, or `ctrl+w`.

const MOD_SHIFT: u8 = 1;
const MOD_ALT: u8 = 2;
const MOD_CTRL: u8 = 4;

const CODEPOINT_TAB: u32 = 9;
const CODEPOINT_ENTER: u32 = 13;
const CODEPOINT_ESCAPE: u32 = 27;
const CODEPOINT_SPACE: u32 = 32;
const CODEPOINT_BACKSPACE: u32 = 127;
const CODEPOINT_KP_ENTER: u32 = 57414;

/// Focus reporting (`ESC [ ? 1004 h`) sequences.
pub const FOCUS_IN: &str = "\x1b[I";
pub const FOCUS_OUT: &str = "\x1b[O";

/// Returns the normalized key id for a single key sequence.
pub fn parse_key(data: &str) -> Option<String> {
    if data.is_empty() {
        return None;
    }

    if let Some(key_id) = legacy_sequence_key_id(data) {
        return Some(key_id.to_string());
    }

    if let Some((codepoint, modifier)) = parse_csi_u(data) {
        let name = match codepoint {
            CODEPOINT_ESCAPE => "escape".to_string(),
            CODEPOINT_TAB => "tab".to_string(),
            CODEPOINT_ENTER | CODEPOINT_KP_ENTER => "enter".to_string(),
            CODEPOINT_SPACE => "space".to_string(),
            CODEPOINT_BACKSPACE => "backspace".to_string(),
            cp => char::from_u32(cp)
                .filter(|ch| ch.is_ascii_graphic())
                .map(|ch| ch.to_ascii_lowercase().to_string())?,
        };
        return Some(with_modifiers(modifier, &name));
    }

    let mut chars = data.chars();
    let first = chars.next()?;
    let second = chars.next();
    let rest_empty = chars.next().is_none();

    match (first, second) {
        ('\r', None) | ('\n', None) => Some("enter".to_string()),
        ('\t', None) => Some("tab".to_string()),
        ('\x1b', None) => Some("escape".to_string()),
        ('\x7f', None) | ('\x08', None) => Some("backspace".to_string()),
        ('\x00', None) => Some("ctrl+space".to_string()),
        (ch, None) if ('\x01'..='\x1a').contains(&ch) => {
            let letter = char::from(b'a' + (ch as u8 - 1));
            Some(format!("ctrl+{letter}"))
        }
        ('\x1b', Some('\x7f')) if rest_empty => Some("alt+backspace".to_string()),
        ('\x1b', Some('\r')) if rest_empty => Some("alt+enter".to_string()),
        ('\x1b', Some(ch)) if rest_empty && ch.is_ascii_graphic() => {
            Some(format!("alt+{}", ch.to_ascii_lowercase()))
        }
        _ => None,
    }
}

/// Returns the text carried by `data` when it is printable input rather than a key.
pub fn parse_text(data: &str) -> Option<String> {
    if data.is_empty() || data.chars().any(|ch| ch.is_control()) {
        return None;
    }
    Some(data.to_string())
}

/// Whether `data` is the key described by `key_id` (for example `ctrl+w`, `Escape`, `return`).
pub fn matches_key(data: &str, key_id: &str) -> bool {
    let Some(expected) = normalize_key_id(key_id) else {
        return false;
    };
    match parse_key(data) {
        Some(actual) => normalize_key_id(&actual).as_deref() == Some(expected.as_str()),
        None => false,
    }
}

/// Canonical form of a key id: lowercase, aliases folded, modifiers in `ctrl+alt+shift` order.
pub fn normalize_key_id(key_id: &str) -> Option<String> {
    let lowered = key_id.trim().to_ascii_lowercase();
    if lowered.is_empty() {
        return None;
    }
    let parts: Vec<&str> = lowered.split('+').collect();
    let (key, mods) = match parts.split_last() {
        // A trailing `+` names the plus key itself.
        Some((&"", rest)) if !rest.is_empty() => ("+", &rest[..rest.len() - 1]),
        Some((key, rest)) => (*key, rest),
        None => return None,
    };
    if key.is_empty() {
        return None;
    }

    let mut modifier = 0u8;
    for m in mods {
        match *m {
            "shift" => modifier |= MOD_SHIFT,
            "alt" | "option" | "meta" => modifier |= MOD_ALT,
            "ctrl" | "control" => modifier |= MOD_CTRL,
            _ => return None,
        }
    }

    let key = match key {
        "esc" => "escape",
        "return" => "enter",
        "del" => "delete",
        "pageup" => "pageup",
        "pagedown" => "pagedown",
        other => other,
    };
    Some(with_modifiers(modifier, key))
}

fn with_modifiers(modifier: u8, key: &str) -> String {
    let mut out = String::new();
    if modifier & MOD_CTRL != 0 {
        out.push_str("ctrl+");
    }
    if modifier & MOD_ALT != 0 {
        out.push_str("alt+");
    }
    if modifier & MOD_SHIFT != 0 {
        out.push_str("shift+");
    }
    out.push_str(key);
    out
}

fn parse_csi_u(data: &str) -> Option<(u32, u8)> {
    let body = data.strip_prefix("\x1b[")?.strip_suffix('u')?;
    let mut fields = body.split(';');
    let codepoint = fields.next()?.split(':').next()?.parse::<u32>().ok()?;
    let modifier = match fields.next() {
        Some(raw) => {
            let value = raw.split(':').next()?.parse::<u8>().ok()?;
            value.saturating_sub(1) & (MOD_SHIFT | MOD_ALT | MOD_CTRL)
        }
        None => 0,
    };
    Some((codepoint, modifier))
}

fn legacy_sequence_key_id(data: &str) -> Option<&'static str> {
    match data {
        "\x1b[A" | "\x1bOA" => Some("up"),
        "\x1b[B" | "\x1bOB" => Some("down"),
        "\x1b[C" | "\x1bOC" => Some("right"),
        "\x1b[D" | "\x1bOD" => Some("left"),
        "\x1b[H" | "\x1bOH" | "\x1b[1~" | "\x1b[7~" => Some("home"),
        "\x1b[F" | "\x1bOF" | "\x1b[4~" | "\x1b[8~" => Some("end"),
        "\x1b[2~" => Some("insert"),
        "\x1b[3~" => Some("delete"),
        "\x1b[5~" | "\x1b[[5~" => Some("pageup"),
        "\x1b[6~" | "\x1b[[6~" => Some("pagedown"),
        "\x1b[Z" => Some("shift+tab"),
        "\x1b[1;5A" | "\x1bOa" => Some("ctrl+up"),
        "\x1b[1;5B" | "\x1bOb" => Some("ctrl+down"),
        "\x1b[1;5C" | "\x1bOc" => Some("ctrl+right"),
        "\x1b[1;5D" | "\x1bOd" => Some("ctrl+left"),
        "\x1b[1;3C" => Some("alt+right"),
        "\x1b[1;3D" => Some("alt+left"),
        "\x1b[3;5~" => Some("ctrl+delete"),
        "\x1b[3;3~" => Some("alt+delete"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{matches_key, normalize_key_id, parse_key, parse_text};

    #[test]
    fn control_bytes_map_to_named_keys() {
        assert_eq!(parse_key("\r"), Some("enter".to_string()));
        assert_eq!(parse_key("\x7f"), Some("backspace".to_string()));
        assert_eq!(parse_key("\x17"), Some("ctrl+w".to_string()));
        assert_eq!(parse_key("\x1b"), Some("escape".to_string()));
        assert_eq!(parse_key("\x1b[Z"), Some("shift+tab".to_string()));
    }

    #[test]
    fn csi_u_reports_carry_modifiers() {
        assert_eq!(parse_key("\x1b[13u"), Some("enter".to_string()));
        assert_eq!(parse_key("\x1b[13;2u"), Some("shift+enter".to_string()));
        assert_eq!(parse_key("\x1b[119;5u"), Some("ctrl+w".to_string()));
    }

    #[test]
    fn printable_input_is_text() {
        assert_eq!(parse_text("rust, go"), Some("rust, go".to_string()));
        assert_eq!(parse_text("a\r"), None);
        assert_eq!(parse_text(""), None);
    }

    #[test]
    fn key_ids_are_normalized_before_matching() {
        assert_eq!(normalize_key_id("Shift+Ctrl+X"), Some("ctrl+shift+x".to_string()));
        assert_eq!(normalize_key_id("esc"), Some("escape".to_string()));
        assert_eq!(normalize_key_id("ctrl++"), Some("ctrl++".to_string()));
        assert!(matches_key("\r", "return"));
        assert!(matches_key("\x1b[6~", "pageDown"));
        assert!(!matches_key("\r", "tab"));
        assert!(!matches_key("\r", "hyper+enter"));
    }
}
