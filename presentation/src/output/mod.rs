//! Result formatting
//!
//! - [`console::ConsoleFormatter`] - colored text
//! - [`json::JsonFormatter`] - pretty-printed JSON

pub mod console;
pub mod formatter;
pub mod json;
