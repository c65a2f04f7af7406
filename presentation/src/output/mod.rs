//! Output formatting.

pub mod console;
pub mod formatter;
pub mod json;
