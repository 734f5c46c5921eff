//! Text helpers (ANSI skipping, width calculations, truncation).
//!
//! Pure string in/string out helpers. The widget layer styles tag chips with SGR sequences, so
//! every width computation here ignores escape sequences.

pub mod ansi;
pub mod utils;
pub mod width;
