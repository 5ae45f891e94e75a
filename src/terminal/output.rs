//! `FrameBuffer`: single-syscall output buffer for ANSI sequences.

use std::io::Write;

/// Pre-allocated buffer for building one screen frame.
///
/// All escape sequences and row content are accumulated here, then
/// flushed in a single `write()` syscall to minimize visible tearing.
pub struct FrameBuffer {
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Create a frame buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write raw bytes.
    #[inline]
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Move cursor to (row, col), 0-indexed; emitted 1-indexed for ANSI.
    #[inline]
    pub fn cursor_move(&mut self, row: usize, col: usize) {
        // CSI row ; col H
        let _ = write!(self.data, "\x1b[{};{}H", row + 1, col + 1);
    }

    /// Move cursor to the top-left corner.
    #[inline]
    pub fn cursor_home(&mut self) {
        self.data.extend_from_slice(b"\x1b[H");
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25l");
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25h");
    }

    /// Erase from the cursor to the end of the line.
    #[inline]
    pub fn erase_line(&mut self) {
        self.data.extend_from_slice(b"\x1b[K");
    }

    /// Enter inverted video.
    #[inline]
    pub fn invert(&mut self) {
        self.data.extend_from_slice(b"\x1b[7m");
    }

    /// Reset text attributes.
    #[inline]
    pub fn normal(&mut self) {
        self.data.extend_from_slice(b"\x1b[m");
    }

    /// Clear the entire screen.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[2J");
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
