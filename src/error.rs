//! Crate-wide error type.
//!
//! Two failure classes exist: fatal session errors (terminal attributes,
//! window sizing) that abort the editor, and ordinary I/O errors that are
//! reported through the message bar and never unwind the run loop.

use std::io;
use thiserror::Error;

/// Errors produced by the editor core.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing terminal attributes failed.
    #[error("terminal attribute error: {0}")]
    Termios(#[source] io::Error),

    /// Both window-size query paths were exhausted.
    #[error("could not determine window size")]
    WindowSize,

    /// An underlying I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
