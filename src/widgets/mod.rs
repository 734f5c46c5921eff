//! Widgets that paint the tags engine into terminal lines.

pub mod suggestion_list;
pub mod tags_input;

pub use suggestion_list::{SuggestionList, SuggestionListTheme};
pub use tags_input::{TagsInput, TagsInputTheme};
