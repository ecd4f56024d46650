//! Rendering module for converting results to output formats.

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::to_text;
