//! Utility helpers.

use unicode_segmentation::UnicodeSegmentation;

use super::ansi::{escape_len_at, ANSI_RESET};
use super::width::{grapheme_width, visible_width};

pub fn grapheme_segments(text: &str) -> unicode_segmentation::Graphemes<'_> {
    UnicodeSegmentation::graphemes(text, true)
}

pub fn is_whitespace_char(ch: char) -> bool {
    ch.is_whitespace()
}

pub fn is_punctuation_char(ch: char) -> bool {
    matches!(
        ch,
        '(' | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | '<'
            | '>'
            | '.'
            | ','
            | ';'
            | ':'
            | '\''
            | '"'
            | '!'
            | '?'
            | '+'
            | '-'
            | '='
            | '*'
            | '/'
            | '\\'
            | '|'
            | '&'
            | '%'
            | '^'
            | '$'
            | '#'
            | '@'
            | '~'
            | '`'
    )
}

/// Pads `line` with spaces up to `width` visible columns.
pub fn pad_to_width(line: &str, width: usize) -> String {
    let padding = width.saturating_sub(visible_width(line));
    if padding == 0 {
        return line.to_string();
    }
    format!("{line}{}", " ".repeat(padding))
}

/// Cuts `text` to at most `max_width` visible columns, appending `ellipsis` when cut.
///
/// Escape sequences are copied through untouched and a reset is emitted before the ellipsis so a
/// cut inside a styled run never leaks its style.
pub fn truncate_to_width(text: &str, max_width: usize, ellipsis: &str) -> String {
    if max_width == 0 {
        return String::new();
    }
    if visible_width(text) <= max_width {
        return text.to_string();
    }

    let target = max_width.saturating_sub(visible_width(ellipsis));
    if target == 0 {
        return ellipsis.chars().take(max_width).collect();
    }

    let mut out = String::with_capacity(text.len());
    let mut used = 0;
    let mut idx = 0;
    'outer: while idx < text.len() {
        if let Some(len) = escape_len_at(text, idx) {
            out.push_str(&text[idx..idx + len]);
            idx += len;
            continue;
        }
        let run_end = next_escape_or_end(text, idx);
        for grapheme in grapheme_segments(&text[idx..run_end]) {
            let width = grapheme_width(grapheme);
            if used + width > target {
                break 'outer;
            }
            out.push_str(grapheme);
            used += width;
        }
        idx = run_end;
    }

    out.push_str(ANSI_RESET);
    out.push_str(ellipsis);
    out
}

fn next_escape_or_end(input: &str, mut idx: usize) -> usize {
    while idx < input.len() {
        if escape_len_at(input, idx).is_some() {
            break;
        }
        match input[idx..].chars().next() {
            Some(ch) => idx += ch.len_utf8(),
            None => break,
        }
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::{grapheme_segments, is_punctuation_char, pad_to_width, truncate_to_width};
    use crate::core::text::width::visible_width;

    #[test]
    fn truncate_returns_original_when_shorter() {
        assert_eq!(truncate_to_width("hello", 6, "…"), "hello");
    }

    #[test]
    fn truncate_adds_ellipsis_and_reset() {
        let truncated = truncate_to_width("hello", 4, "...");
        assert_eq!(truncated, "h\x1b[0m...");
        assert_eq!(visible_width(&truncated), 4);
    }

    #[test]
    fn truncate_preserves_ansi_prefix() {
        let truncated = truncate_to_width("\x1b[31mhello", 4, "...");
        assert_eq!(truncated, "\x1b[31mh\x1b[0m...");
    }

    #[test]
    fn truncate_handles_small_max_width() {
        assert_eq!(truncate_to_width("hello", 2, "..."), "..");
    }

    #[test]
    fn pad_counts_visible_columns_only() {
        assert_eq!(pad_to_width("\x1b[1mhi\x1b[0m", 4), "\x1b[1mhi\x1b[0m  ");
        assert_eq!(pad_to_width("long", 2), "long");
    }

    #[test]
    fn punctuation_classification() {
        assert!(is_punctuation_char(','));
        assert!(!is_punctuation_char('_'));
    }

    #[test]
    fn grapheme_segments_splits_clusters() {
        let clusters: Vec<&str> = grapheme_segments("a🇺🇸").collect();
        assert_eq!(clusters, vec!["a", "🇺🇸"]);
    }
}
