//! Tags input engine.
//!
//! Rendering-free: nothing under `tags` depends on `widgets`. The widget layer drives a
//! [`TagsField`] and paints its state.

pub mod binding;
pub mod buffer;
pub mod collection;
pub mod field;
pub mod options;
pub mod policy;
pub mod router;
pub mod suggestions;

pub use binding::{FieldRule, FormBinding, FormErrors, FormValues, MemoryFieldBinding, MemoryForm};
pub use buffer::InputBuffer;
pub use collection::TagCollection;
pub use field::{CommitOutcome, FieldState, TagsField, TAG_SEPARATOR};
pub use options::{TagVariant, TagsInputOptions, Variant};
pub use policy::ValidationPolicy;
pub use router::{Intent, KeyEventRouter, RouterState};
pub use suggestions::{SuggestionEngine, DEFAULT_SUGGESTION_LIMIT};
