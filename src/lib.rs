//! # Quill
//!
//! A minimal raw-mode terminal text editor.
//!
//! Quill owns the terminal for the life of the process: it switches
//! stdin to raw mode, decodes the incoming escape-sequence stream into
//! logical keys, keeps the document as a row-oriented buffer with a
//! tab-aware render projection, and repaints the whole screen as one
//! atomic write per keystroke.
//!
//! ## Core Concepts
//!
//! - **Scoped raw mode**: a guard restores the original termios state on
//!   every exit path, fatal errors included
//! - **Single-write frames**: each repaint is composed into one buffer
//!   and flushed with a single syscall
//! - **Raw vs. render space**: cursor math happens on raw bytes, painting
//!   on the tab-expanded projection
//!
//! ## Example
//!
//! ```rust,ignore
//! // Open (or create) a file and hand the terminal to the editor.
//! quill::run(Some("notes.txt".into()))?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod editor;
pub mod error;
pub mod terminal;

// Re-exports for convenience
pub use buffer::{Row, TextBuffer, TAB_STOP};
pub use editor::{Editor, EditorState, Outcome, StatusMessage, Viewport};
pub use error::{Error, Result};
pub use terminal::{Key, Terminal, WindowSize};

use std::path::PathBuf;

/// Open the editor, optionally on a file, and run until quit.
///
/// # Errors
///
/// Returns a fatal session error (terminal attributes, window sizing) or
/// an I/O error from loading a file that exists but cannot be read.
pub fn run(path: Option<PathBuf>) -> Result<()> {
    Editor::new(path)?.run()
}
