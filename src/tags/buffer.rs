//! Uncommitted text being typed into the field.

use crate::core::text::utils::{grapheme_segments, is_punctuation_char, is_whitespace_char};
use crate::core::text::width::grapheme_len;

/// Single-line edit buffer with a grapheme-aware cursor and an optional soft length cap.
///
/// Once the cap is reached further input is dropped silently; nothing here is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    value: String,
    cursor: usize,
    max_length: Option<usize>,
}

impl InputBuffer {
    pub fn new(max_length: Option<usize>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            max_length,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Byte offset of the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Whether the buffer holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Takes the whole buffer, leaving it empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    /// Inserts `text` at the cursor, dropping graphemes past the cap.
    ///
    /// Returns the number of grapheme clusters actually inserted.
    pub fn insert(&mut self, text: &str) -> usize {
        let mut room = match self.max_length {
            Some(max) => max.saturating_sub(grapheme_len(&self.value)),
            None => usize::MAX,
        };

        let mut accepted = String::with_capacity(text.len());
        let mut inserted = 0;
        for grapheme in grapheme_segments(text) {
            if room == 0 {
                break;
            }
            accepted.push_str(grapheme);
            inserted += 1;
            room -= 1;
        }

        if accepted.is_empty() {
            return 0;
        }
        self.value.insert_str(self.cursor, &accepted);
        self.cursor += accepted.len();
        inserted
    }

    pub fn delete_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let grapheme_len = grapheme_segments(&self.value[..self.cursor])
            .next_back()
            .map(str::len)
            .unwrap_or(1);
        let start = self.cursor.saturating_sub(grapheme_len);
        self.value.replace_range(start..self.cursor, "");
        self.cursor = start;
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        let grapheme_len = grapheme_segments(&self.value[self.cursor..])
            .next()
            .map(str::len)
            .unwrap_or(1);
        let end = (self.cursor + grapheme_len).min(self.value.len());
        self.value.replace_range(self.cursor..end, "");
        true
    }

    pub fn delete_word_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let end = self.cursor;
        self.move_word_backward();
        self.value.replace_range(self.cursor..end, "");
        true
    }

    pub fn delete_to_start(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.value.replace_range(..self.cursor, "");
        self.cursor = 0;
        true
    }

    pub fn delete_to_end(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        self.value.truncate(self.cursor);
        true
    }

    pub fn move_left(&mut self) {
        if let Some(last) = grapheme_segments(&self.value[..self.cursor]).next_back() {
            self.cursor -= last.len();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = grapheme_segments(&self.value[self.cursor..]).next() {
            self.cursor += next.len();
        }
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.value.len();
    }

    fn move_word_backward(&mut self) {
        let mut graphemes: Vec<&str> = grapheme_segments(&self.value[..self.cursor]).collect();

        while let Some(last) = graphemes.last() {
            if !is_whitespace_segment(last) {
                break;
            }
            self.cursor -= last.len();
            graphemes.pop();
        }

        let punctuation_run = graphemes.last().is_some_and(|last| is_punctuation_segment(last));
        while let Some(last) = graphemes.last() {
            let same_class = if punctuation_run {
                is_punctuation_segment(last)
            } else {
                !is_whitespace_segment(last) && !is_punctuation_segment(last)
            };
            if !same_class {
                break;
            }
            self.cursor -= last.len();
            graphemes.pop();
        }
    }
}

fn is_whitespace_segment(segment: &str) -> bool {
    segment.chars().any(is_whitespace_char)
}

fn is_punctuation_segment(segment: &str) -> bool {
    segment.chars().any(is_punctuation_char)
}

#[cfg(test)]
mod tests {
    use super::InputBuffer;

    #[test]
    fn insert_respects_soft_cap() {
        let mut buffer = InputBuffer::new(Some(4));
        assert_eq!(buffer.insert("ru"), 2);
        assert_eq!(buffer.insert("stacean"), 2);
        assert_eq!(buffer.as_str(), "rust");
        assert_eq!(buffer.insert("!"), 0);
        assert_eq!(buffer.as_str(), "rust");
    }

    #[test]
    fn cap_counts_graphemes_not_bytes() {
        let mut buffer = InputBuffer::new(Some(2));
        buffer.insert("é🇺🇸x");
        assert_eq!(buffer.as_str(), "é🇺🇸");
    }

    #[test]
    fn edits_at_cursor() {
        let mut buffer = InputBuffer::new(None);
        buffer.insert("helo");
        buffer.move_left();
        buffer.insert("l");
        assert_eq!(buffer.as_str(), "hello");
        assert_eq!(buffer.cursor(), 4);

        buffer.delete_forward();
        assert_eq!(buffer.as_str(), "hell");
        buffer.move_to_start();
        assert!(!buffer.delete_backward());
        buffer.move_right();
        buffer.delete_to_end();
        assert_eq!(buffer.as_str(), "h");
    }

    #[test]
    fn delete_word_backward_stops_at_class_change() {
        let mut buffer = InputBuffer::new(None);
        buffer.insert("next.js rocks  ");
        assert!(buffer.delete_word_backward());
        assert_eq!(buffer.as_str(), "next.js ");
        assert!(buffer.delete_word_backward());
        assert_eq!(buffer.as_str(), "next.");
        assert!(buffer.delete_word_backward());
        assert_eq!(buffer.as_str(), "next");
    }

    #[test]
    fn take_empties_buffer() {
        let mut buffer = InputBuffer::new(None);
        buffer.insert("go");
        assert_eq!(buffer.take(), "go");
        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor(), 0);
    }
}
