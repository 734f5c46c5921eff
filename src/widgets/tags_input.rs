//! Tags input widget.

use std::sync::{Mutex, MutexGuard};

use unicode_segmentation::UnicodeSegmentation;

use crate::core::component::{Component, CursorPos, Focusable};
use crate::core::input_event::InputEvent;
use crate::core::keybindings::{KeybindingsHandle, KeybindingsManager};
use crate::core::text::ansi::sgr;
use crate::core::text::utils::{pad_to_width, truncate_to_width};
use crate::core::text::width::{grapheme_width, visible_width};
use crate::tags::{FormBinding, RouterState, TagVariant, TagsField, Variant};

use super::suggestion_list::{SuggestionList, SuggestionListTheme};

pub struct TagsInputTheme {
    pub label: Box<dyn Fn(&str) -> String>,
    pub counter: Box<dyn Fn(&str) -> String>,
    pub border: Box<dyn Fn(&str) -> String>,
    pub chip: Box<dyn Fn(TagVariant, &str) -> String>,
    pub placeholder: Box<dyn Fn(&str) -> String>,
    pub cursor: Box<dyn Fn(&str) -> String>,
    pub description: Box<dyn Fn(&str) -> String>,
    pub error: Box<dyn Fn(&str) -> String>,
    pub disabled: Box<dyn Fn(&str) -> String>,
    pub suggestions: SuggestionListTheme,
}

impl Default for TagsInputTheme {
    fn default() -> Self {
        Self {
            label: Box::new(|text| sgr("1", text)),
            counter: Box::new(|text| sgr("2", text)),
            border: Box::new(|text| sgr("2", text)),
            chip: Box::new(|variant, text| match variant {
                TagVariant::Default => sgr("7", &format!(" {text} ")),
                TagVariant::Secondary => sgr("48;5;238;97", &format!(" {text} ")),
                TagVariant::Outline => format!("({text})"),
                TagVariant::Destructive => sgr("41;97", &format!(" {text} ")),
            }),
            placeholder: Box::new(|text| sgr("2", text)),
            cursor: Box::new(|text| format!("\x1b[7m{text}\x1b[27m")),
            description: Box::new(|text| sgr("2", text)),
            error: Box::new(|text| sgr("31", text)),
            disabled: Box::new(|text| sgr("2", text)),
            suggestions: SuggestionListTheme {
                highlighted: Box::new(|text| sgr("36", text)),
                item: Box::new(|text| text.to_string()),
                scroll_info: Box::new(|text| sgr("2", text)),
            },
        }
    }
}

impl TagsInputTheme {
    /// Unstyled theme; chips render as `[tag]`.
    pub fn plain() -> Self {
        Self {
            label: Box::new(|text| text.to_string()),
            counter: Box::new(|text| text.to_string()),
            border: Box::new(|text| text.to_string()),
            chip: Box::new(|_, text| format!("[{text}]")),
            placeholder: Box::new(|text| text.to_string()),
            cursor: Box::new(|text| text.to_string()),
            description: Box::new(|text| text.to_string()),
            error: Box::new(|text| text.to_string()),
            disabled: Box::new(|text| text.to_string()),
            suggestions: SuggestionListTheme::plain(),
        }
    }
}

/// Renders a [`TagsField`] as label, tag chips, input line, suggestions, and messages.
pub struct TagsInput<B: FormBinding> {
    field: TagsField<B>,
    keybindings: KeybindingsHandle,
    theme: TagsInputTheme,
    dropdown: SuggestionList,
    last_cursor_pos: Option<CursorPos>,
}

impl<B: FormBinding> TagsInput<B> {
    pub fn new(field: TagsField<B>, keybindings: KeybindingsHandle, mut theme: TagsInputTheme) -> Self {
        let list_theme = std::mem::replace(&mut theme.suggestions, SuggestionListTheme::plain());
        let dropdown = SuggestionList::new(field.options().suggestion_limit, list_theme);
        Self {
            field,
            keybindings,
            theme,
            dropdown,
            last_cursor_pos: None,
        }
    }

    pub fn field(&self) -> &TagsField<B> {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut TagsField<B> {
        &mut self.field
    }

    pub fn into_field(self) -> TagsField<B> {
        self.field
    }

    fn counter_text(&self) -> String {
        let options = self.field.options();
        let count = self.field.tags().len();
        match options.max_tags {
            Some(max) => format!("{count}/{max} {}", options.counter_noun()),
            None => format!("{count} {}", options.counter_noun()),
        }
    }

    fn render_header(&self, width: usize, lines: &mut Vec<String>) {
        let options = self.field.options();
        let label = truncate_to_width(&options.label, width, "…");

        match options.variant {
            Variant::Minimal => lines.push((self.theme.label)(&label)),
            Variant::Default => {
                let counter = self.counter_text();
                let line = format!("{label}  {counter}");
                if visible_width(&line) <= width {
                    lines.push(format!(
                        "{}  {}",
                        (self.theme.label)(&label),
                        (self.theme.counter)(&counter)
                    ));
                } else {
                    lines.push((self.theme.label)(&label));
                }
            }
            Variant::Enterprise => {
                let counter = self.counter_text();
                let gap = width.saturating_sub(visible_width(&label) + visible_width(&counter));
                if gap >= 2 {
                    lines.push(format!(
                        "{}{}{}",
                        (self.theme.label)(&label),
                        " ".repeat(gap),
                        (self.theme.counter)(&counter)
                    ));
                } else {
                    lines.push((self.theme.label)(&label));
                }
                lines.push((self.theme.border)(&"─".repeat(width)));
            }
        }
    }

    fn render_chips(&self, width: usize, lines: &mut Vec<String>) {
        let variant = self.field.options().tag_variant;
        let mut current = String::new();
        let mut current_width = 0;

        for tag in self.field.tags() {
            let mut chip = (self.theme.chip)(variant, tag);
            if visible_width(&chip) > width {
                let frame = visible_width(&chip).saturating_sub(visible_width(tag));
                let budget = width.saturating_sub(frame);
                chip = (self.theme.chip)(variant, &truncate_to_width(tag, budget, "…"));
            }
            let chip_width = visible_width(&chip);

            if current_width > 0 && current_width + 1 + chip_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(&chip);
            current_width += chip_width;
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    fn render_input(&mut self, width: usize, lines: &mut Vec<String>) {
        let options = self.field.options();
        let prefix = options
            .start_icon
            .as_deref()
            .map(|icon| format!("{icon} "))
            .unwrap_or_default();
        let suffix = options
            .end_icon
            .as_deref()
            .map(|icon| format!(" {icon}"))
            .unwrap_or_default();
        let available = width.saturating_sub(visible_width(&prefix) + visible_width(&suffix));
        let row = lines.len();
        let focused = self.field.is_focused();
        let buffer = self.field.buffer();

        let (body, cursor_col) = if buffer.is_empty() {
            let hint = if self.field.is_full() {
                options
                    .max_tags
                    .map(|max| format!("Limit of {max} reached"))
                    .unwrap_or_default()
            } else {
                options.placeholder.clone().unwrap_or_default()
            };
            let hint = truncate_to_width(&hint, available.saturating_sub(1), "…");
            let body = if focused {
                format!("{}{}", (self.theme.cursor)(" "), (self.theme.placeholder)(&hint))
            } else {
                (self.theme.placeholder)(&hint)
            };
            (body, 0)
        } else {
            let value = buffer.as_str();
            let (start, end) = input_window(value, buffer.cursor(), available);
            if focused {
                let cursor = buffer.cursor().clamp(start, end);
                let before = &value[start..cursor];
                let rest = &value[cursor..end];
                let mut graphemes = rest.graphemes(true);
                let at = graphemes.next().unwrap_or(" ");
                let after = graphemes.as_str();
                (
                    format!("{before}{}{after}", (self.theme.cursor)(at)),
                    visible_width(before),
                )
            } else {
                (value[start..end].to_string(), visible_width(&value[start..end]))
            }
        };

        self.last_cursor_pos = focused.then(|| CursorPos {
            row,
            col: visible_width(&prefix) + cursor_col,
        });

        if suffix.is_empty() {
            lines.push(format!("{prefix}{body}"));
        } else {
            lines.push(format!("{prefix}{}{suffix}", pad_to_width(&body, available)));
        }
    }

    fn render_dropdown(&mut self, width: usize, lines: &mut Vec<String>) {
        if self.field.state() != RouterState::Suggesting {
            return;
        }
        self.dropdown
            .set_items(self.field.suggestions(), self.field.highlighted());
        lines.extend(self.dropdown.render(width));
    }

    fn render_messages(&self, width: usize, lines: &mut Vec<String>) {
        if let Some(description) = self.field.options().description.as_deref() {
            lines.push((self.theme.description)(&truncate_to_width(description, width, "…")));
        }
        if let Some(error) = self.field.error() {
            lines.push((self.theme.error)(&truncate_to_width(error, width, "…")));
        }
    }
}

/// Byte range of `value` shown in `available` columns, keeping the cursor cell visible.
fn input_window(value: &str, cursor: usize, available: usize) -> (usize, usize) {
    let segments: Vec<(usize, &str)> = value.grapheme_indices(true).collect();
    let cursor_idx = segments
        .iter()
        .position(|(offset, _)| *offset >= cursor)
        .unwrap_or(segments.len());

    // One column is reserved for the cursor cell when it sits past the last grapheme.
    let budget = available.saturating_sub(1).max(1);
    let mut start = 0;
    let mut used: usize = segments[..cursor_idx]
        .iter()
        .map(|(_, grapheme)| grapheme_width(grapheme))
        .sum();
    while start < cursor_idx && used > budget {
        used -= grapheme_width(segments[start].1);
        start += 1;
    }

    let mut end = cursor_idx;
    while end < segments.len() {
        let width = grapheme_width(segments[end].1);
        if used + width > available {
            break;
        }
        used += width;
        end += 1;
    }

    let byte_at = |idx: usize| segments.get(idx).map_or(value.len(), |(offset, _)| *offset);
    (byte_at(start), byte_at(end))
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl<B: FormBinding> Component for TagsInput<B> {
    fn render(&mut self, width: usize) -> Vec<String> {
        let width = width.max(1);
        self.field.refresh_error();
        let mut lines = Vec::new();
        self.render_header(width, &mut lines);
        self.render_chips(width, &mut lines);
        self.render_input(width, &mut lines);
        self.render_dropdown(width, &mut lines);
        self.render_messages(width, &mut lines);

        if self.field.is_disabled() {
            let disabled = &self.theme.disabled;
            lines = lines.iter().map(|line| disabled(line)).collect();
        }
        lines
    }

    fn handle_event(&mut self, event: &InputEvent) {
        let keybindings: MutexGuard<'_, KeybindingsManager> = lock_unpoisoned(&self.keybindings);
        self.field.handle_event(event, &keybindings);
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        self.last_cursor_pos
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }
}

impl<B: FormBinding> Focusable for TagsInput<B> {
    fn set_focused(&mut self, focused: bool) {
        self.field.set_focused(focused);
    }

    fn is_focused(&self) -> bool {
        self.field.is_focused()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{input_window, TagsInput, TagsInputTheme};
    use crate::core::component::{Component, CursorPos, Focusable};
    use crate::core::input_event::parse_input_events;
    use crate::core::keybindings::default_keybindings_handle;
    use crate::tags::{MemoryFieldBinding, MemoryForm, TagsField, TagsInputOptions, Variant};

    fn widget(options: TagsInputOptions, initial: &[&str]) -> TagsInput<MemoryFieldBinding> {
        let form = MemoryForm::new();
        let binding = form.register(
            options.name.clone(),
            initial.iter().map(|tag| tag.to_string()).collect(),
            Vec::new(),
        );
        let field = TagsField::new(options, binding).expect("valid options");
        TagsInput::new(field, default_keybindings_handle(), TagsInputTheme::plain())
    }

    fn send(widget: &mut TagsInput<MemoryFieldBinding>, data: &str) {
        for event in parse_input_events(data) {
            widget.handle_event(&event);
        }
    }

    #[test]
    fn renders_label_chips_and_placeholder() {
        let options = TagsInputOptions::new("skills", "Skills")
            .max_tags(10)
            .placeholder("Type and press Enter...");
        let mut widget = widget(options, &["React", "TypeScript"]);
        assert_eq!(
            widget.render(40),
            vec![
                "Skills  2/10 Skills",
                "[React] [TypeScript]",
                "Type and press Enter...",
            ]
        );
        assert_eq!(widget.cursor_pos(), None);
    }

    #[test]
    fn chips_wrap_to_width() {
        let options = TagsInputOptions::new("tools", "Tools").variant(Variant::Minimal);
        let mut widget = widget(options, &["git", "docker", "figma"]);
        assert_eq!(widget.render(14), vec!["Tools", "[git] [docker]", "[figma]", ""]);
    }

    #[test]
    fn enterprise_variant_draws_rule_and_right_aligned_counter() {
        let options = TagsInputOptions::new("tools", "Tools")
            .variant(Variant::Enterprise)
            .beautify_name("tools");
        let mut widget = widget(options, &[]);
        let lines = widget.render(16);
        assert_eq!(lines[0], "Tools    0 tools");
        assert_eq!(lines[1], "─".repeat(16));
    }

    #[test]
    fn typing_shows_suggestions_and_cursor() {
        let options = TagsInputOptions::new("frameworks", "Frameworks")
            .variant(Variant::Minimal)
            .start_icon("#")
            .suggestions(["React", "Redux", "Vue"]);
        let mut widget = widget(options, &[]);
        widget.set_focused(true);
        send(&mut widget, "re\x1b[B");

        assert_eq!(widget.render(30), vec!["Frameworks", "# re ", "→ React", "  Redux"]);
        assert_eq!(widget.cursor_pos(), Some(CursorPos { row: 1, col: 4 }));

        send(&mut widget, "\r");
        assert_eq!(widget.field().tags(), ["React"]);
        assert_eq!(widget.render(30), vec!["Frameworks", "[React]", "#  "]);
    }

    #[test]
    fn full_field_says_so() {
        let options = TagsInputOptions::new("categories", "Categories")
            .variant(Variant::Minimal)
            .max_tags(1);
        let mut widget = widget(options, &["Frontend"]);
        assert_eq!(widget.render(30)[2], "Limit of 1 reached");
    }

    #[test]
    fn messages_follow_the_input() {
        let form = MemoryForm::new();
        let binding = form.register(
            "skills",
            Vec::new(),
            vec![crate::tags::FieldRule::min_items(1, "At least one skill is required")],
        );
        let options = TagsInputOptions::new("skills", "Skills")
            .variant(Variant::Minimal)
            .description("Add your technical skills");
        let field = TagsField::new(options, binding).expect("valid options");
        let mut widget = TagsInput::new(field, default_keybindings_handle(), TagsInputTheme::plain());

        assert!(form.submit().is_err());
        widget.set_focused(true);
        assert_eq!(
            widget.render(40),
            vec![
                "Skills",
                " ",
                "Add your technical skills",
                "At least one skill is required",
            ]
        );
    }

    #[test]
    fn chip_narrower_than_its_tag_still_renders() {
        let form = MemoryForm::new();
        let binding = form.register("tools", vec!["abcdefgh".to_string()], Vec::new());
        let options = TagsInputOptions::new("tools", "Tools").variant(Variant::Minimal);
        let field = TagsField::new(options, binding).expect("valid options");
        let mut theme = TagsInputTheme::plain();
        theme.chip = Box::new(|_, text| format!("{}!!", text.chars().take(3).collect::<String>()));
        let mut widget = TagsInput::new(field, default_keybindings_handle(), theme);

        let lines = widget.render(4);
        assert_eq!(lines[1], "abc!!");
    }

    #[test]
    fn window_keeps_cursor_visible() {
        assert_eq!(input_window("abcdef", 6, 4), (3, 6));
        assert_eq!(input_window("abcdef", 0, 4), (0, 4));
        assert_eq!(input_window("abc", 3, 10), (0, 3));
    }
}
