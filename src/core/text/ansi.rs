//! Escape sequence scanning.

/// Reset all SGR attributes.
pub const ANSI_RESET: &str = "\x1b[0m";

/// Returns the byte length of the escape sequence starting at `pos`, if any.
///
/// Recognizes CSI (`ESC [ ... final`) and OSC (`ESC ] ... BEL | ESC \`). Anything else starting
/// with ESC is treated as visible text by callers.
pub fn escape_len_at(input: &str, pos: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    if pos + 1 >= bytes.len() || bytes[pos] != 0x1b {
        return None;
    }

    match bytes[pos + 1] {
        b'[' => {
            let mut idx = pos + 2;
            while idx < bytes.len() {
                if (0x40..=0x7e).contains(&bytes[idx]) {
                    return Some(idx + 1 - pos);
                }
                idx += 1;
            }
            None
        }
        b']' => {
            let mut idx = pos + 2;
            while idx < bytes.len() {
                if bytes[idx] == 0x07 {
                    return Some(idx + 1 - pos);
                }
                if bytes[idx] == 0x1b && bytes.get(idx + 1) == Some(&b'\\') {
                    return Some(idx + 2 - pos);
                }
                idx += 1;
            }
            None
        }
        _ => None,
    }
}

/// Strips CSI and OSC sequences, keeping visible text only.
pub fn strip_ansi(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut idx = 0;
    while idx < input.len() {
        if let Some(len) = escape_len_at(input, idx) {
            idx += len;
            continue;
        }
        let Some(ch) = input[idx..].chars().next() else {
            break;
        };
        out.push(ch);
        idx += ch.len_utf8();
    }
    out
}

/// Wraps `text` in an SGR sequence and resets afterwards.
pub fn sgr(params: &str, text: &str) -> String {
    format!("\x1b[{params}m{text}{ANSI_RESET}")
}
