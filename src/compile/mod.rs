//! Compilation of models to MiniZinc source.
//!
//! Compilation runs in two passes:
//! 1. `Ir::build` discovers and names the model's entities
//! 2. `render` turns the IR into source text, collecting `Flags` on the way

pub mod flags;
pub mod ir;
pub mod render;

pub use flags::{Flag, Flags};
pub use ir::{validate_name, Ir};
pub use render::render;
