//! Suggestion dropdown.

use crate::core::component::Component;
use crate::core::text::utils::truncate_to_width;

pub struct SuggestionListTheme {
    pub highlighted: Box<dyn Fn(&str) -> String>,
    pub item: Box<dyn Fn(&str) -> String>,
    pub scroll_info: Box<dyn Fn(&str) -> String>,
}

impl SuggestionListTheme {
    pub fn plain() -> Self {
        Self {
            highlighted: Box::new(|text| text.to_string()),
            item: Box::new(|text| text.to_string()),
            scroll_info: Box::new(|text| text.to_string()),
        }
    }
}

/// Renders the visible candidates with an optional highlight marker.
pub struct SuggestionList {
    items: Vec<String>,
    highlighted: Option<usize>,
    max_visible: usize,
    theme: SuggestionListTheme,
}

impl SuggestionList {
    pub fn new(max_visible: usize, theme: SuggestionListTheme) -> Self {
        Self {
            items: Vec::new(),
            highlighted: None,
            max_visible,
            theme,
        }
    }

    pub fn set_items(&mut self, items: &[String], highlighted: Option<usize>) {
        self.items = items.to_vec();
        self.highlighted = highlighted.filter(|index| *index < self.items.len());
    }

    pub fn set_max_visible(&mut self, max_visible: usize) {
        self.max_visible = max_visible;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn window(&self) -> (usize, usize) {
        let max_visible = self.max_visible.max(1).min(self.items.len());
        let focus = self.highlighted.unwrap_or(0);
        let start = if self.items.len() <= max_visible {
            0
        } else {
            let candidate = focus.saturating_sub(max_visible / 2);
            candidate.min(self.items.len() - max_visible)
        };
        (start, (start + max_visible).min(self.items.len()))
    }
}

impl Component for SuggestionList {
    fn render(&mut self, width: usize) -> Vec<String> {
        if self.items.is_empty() {
            return Vec::new();
        }

        let (start, end) = self.window();
        let mut lines = Vec::with_capacity(end - start + 1);
        for (idx, item) in self.items.iter().enumerate().take(end).skip(start) {
            let text = truncate_to_width(item, width.saturating_sub(2), "…");
            if Some(idx) == self.highlighted {
                lines.push((self.theme.highlighted)(&format!("→ {text}")));
            } else {
                lines.push((self.theme.item)(&format!("  {text}")));
            }
        }

        if start > 0 || end < self.items.len() {
            let position = self.highlighted.map_or(0, |index| index + 1);
            let info = format!("  ({position}/{})", self.items.len());
            let info = truncate_to_width(&info, width, "");
            lines.push((self.theme.scroll_info)(&info));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::{SuggestionList, SuggestionListTheme};
    use crate::core::component::Component;

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn marks_highlighted_item() {
        let mut list = SuggestionList::new(8, SuggestionListTheme::plain());
        list.set_items(&items(&["React", "Redux"]), Some(1));
        assert_eq!(list.render(20), vec!["  React", "→ Redux"]);
    }

    #[test]
    fn scrolls_to_keep_highlight_visible() {
        let mut list = SuggestionList::new(2, SuggestionListTheme::plain());
        list.set_items(&items(&["a", "b", "c", "d"]), Some(3));
        assert_eq!(list.render(20), vec!["  c", "→ d", "  (4/4)"]);
    }

    #[test]
    fn max_visible_can_change_after_construction() {
        let mut list = SuggestionList::new(8, SuggestionListTheme::plain());
        list.set_items(&items(&["a", "b", "c"]), Some(0));
        assert_eq!(list.render(20), vec!["→ a", "  b", "  c"]);

        list.set_max_visible(1);
        assert_eq!(list.render(20), vec!["→ a", "  (1/3)"]);
    }

    #[test]
    fn out_of_range_highlight_is_dropped() {
        let mut list = SuggestionList::new(8, SuggestionListTheme::plain());
        list.set_items(&items(&["a"]), Some(4));
        assert_eq!(list.render(10), vec!["  a"]);
        list.set_items(&[], None);
        assert!(list.render(10).is_empty());
    }
}
