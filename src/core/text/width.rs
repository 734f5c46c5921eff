//! Grapheme width and visible width helpers.

use emojis::get as emoji_get;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use super::ansi::strip_ansi;

const TAB_WIDTH: usize = 3;

pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_empty() {
        return 0;
    }
    if grapheme == "\t" {
        return TAB_WIDTH;
    }
    if emoji_get(grapheme).is_some() {
        return 2;
    }

    grapheme
        .chars()
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
        .sum()
}

/// Terminal columns occupied by `input`, ignoring escape sequences.
pub fn visible_width(input: &str) -> usize {
    if input.is_empty() {
        return 0;
    }
    strip_ansi(input).graphemes(true).map(grapheme_width).sum()
}

/// Number of user-perceived characters. Tag lengths are measured with this.
pub fn grapheme_len(input: &str) -> usize {
    input.graphemes(true).count()
}

#[cfg(test)]
mod tests {
    use super::{grapheme_len, visible_width};

    #[test]
    fn ansi_ignored_in_width() {
        assert_eq!(visible_width("hi\x1b[31m!!\x1b[0m"), 4);
    }

    #[test]
    fn rgi_emoji_width_is_two() {
        assert_eq!(visible_width("😀"), 2);
    }

    #[test]
    fn grapheme_len_counts_clusters() {
        assert_eq!(grapheme_len("café"), 4);
        assert_eq!(grapheme_len("a🇺🇸"), 2);
        assert_eq!(grapheme_len(""), 0);
    }
}
