//! Core interfaces and types shared by the engine and the widgets.

pub mod component;
pub mod input;
pub mod input_event;
pub mod keybindings;
pub mod text;
