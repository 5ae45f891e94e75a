//! Buffer module: the document model.
//!
//! This module contains:
//! - [`Row`]: one line of text, raw bytes plus tab-expanded render bytes
//! - [`TextBuffer`]: the ordered row sequence with dirty tracking and
//!   file persistence

pub mod row;
pub mod text;

pub use row::{Row, TAB_STOP};
pub use text::TextBuffer;
