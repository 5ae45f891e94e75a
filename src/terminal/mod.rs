//! Terminal session: raw mode, key input, sized output.

pub mod keys;
pub mod output;
pub mod raw;
pub mod size;

pub use keys::{ctrl, Key, BACKSPACE, ESC};
pub use output::FrameBuffer;
pub use raw::RawModeGuard;
pub use size::WindowSize;

use crate::error::Result;
use std::io::{self, Write};

/// An active raw-mode terminal session.
///
/// Owns the raw-mode guard for its lifetime; dropping the session
/// restores the original terminal attributes.
pub struct Terminal {
    _raw: RawModeGuard,
}

impl Terminal {
    /// Enter raw mode and open a session.
    pub fn new() -> Result<Self> {
        Ok(Self {
            _raw: RawModeGuard::enable()?,
        })
    }

    /// Query the window size (ioctl first, cursor probe fallback).
    pub fn size(&self) -> Result<WindowSize> {
        size::query()
    }

    /// Block until one key event arrives.
    pub fn read_key(&self) -> Result<Key> {
        keys::read_key()
    }

    /// Write a composed frame to the screen in one syscall.
    pub fn flush_frame(&self, frame: &FrameBuffer) -> Result<()> {
        frame.flush_to(&mut io::stdout())?;
        Ok(())
    }

    /// Erase the screen and park the cursor at the top-left corner.
    ///
    /// Used on the way out so the shell prompt reappears on a clean
    /// screen.
    pub fn clear_screen(&self) -> Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(b"\x1b[2J\x1b[H")?;
        stdout.flush()?;
        Ok(())
    }
}
