//! Key dispatch: the editing state machine.

use crate::buffer::Row;
use crate::editor::EditorState;
use crate::terminal::{ctrl, Key, BACKSPACE, ESC};

/// Warnings required before a dirty buffer may be quit.
pub const QUIT_CONFIRMATIONS: u8 = 1;

/// What the run loop should do after a key was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep going.
    Continue,
    /// Terminate normally.
    Quit,
    /// The buffer has no filename; run the interactive save-as prompt.
    PromptSave,
}

impl EditorState {
    /// Apply one key event to the state.
    pub fn apply_key(&mut self, key: Key) -> Outcome {
        // Any key other than the quit chord re-arms the confirmation.
        if key != Key::Byte(ctrl(b'q')) {
            self.quit_remaining = QUIT_CONFIRMATIONS;
        }

        match key {
            Key::Byte(b) if b == ctrl(b'q') => {
                if self.buffer.is_dirty() && self.quit_remaining > 0 {
                    let remaining = self.quit_remaining;
                    let plural = if remaining == 1 { "" } else { "s" };
                    self.set_status(format!(
                        "WARNING! File has unsaved changes. \
                         Press Ctrl-Q {remaining} more time{plural} to quit."
                    ));
                    self.quit_remaining -= 1;
                    return Outcome::Continue;
                }
                Outcome::Quit
            }
            Key::Byte(b) if b == ctrl(b's') => {
                if self.buffer.filename().is_some() {
                    self.save_file();
                    Outcome::Continue
                } else {
                    Outcome::PromptSave
                }
            }
            Key::Byte(b'\r') => {
                let (cy, cx) = self.buffer.insert_newline(self.view.cy, self.view.cx);
                self.view.cy = cy;
                self.view.cx = cx;
                Outcome::Continue
            }
            Key::Byte(BACKSPACE) => {
                self.delete_at_cursor();
                Outcome::Continue
            }
            Key::Byte(b) if b == ctrl(b'h') => {
                self.delete_at_cursor();
                Outcome::Continue
            }
            Key::Delete => {
                // Forward delete removes the cell under the cursor.
                self.move_cursor(Key::ArrowRight);
                self.delete_at_cursor();
                Outcome::Continue
            }
            Key::Byte(b) if b == ctrl(b'k') => {
                self.delete_line();
                Outcome::Continue
            }
            Key::Byte(ESC) => Outcome::Continue,
            Key::Byte(b) if b == ctrl(b'l') => Outcome::Continue,
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight => {
                self.move_cursor(key);
                Outcome::Continue
            }
            Key::Home => {
                self.view.cx = 0;
                Outcome::Continue
            }
            Key::End => {
                self.view.cx = self.current_row_len();
                Outcome::Continue
            }
            Key::PageUp | Key::PageDown => {
                self.page_move(key);
                Outcome::Continue
            }
            Key::Byte(b) if !b.is_ascii_control() && b.is_ascii() => {
                let (cy, cx) = self.buffer.insert_char(self.view.cy, self.view.cx, b);
                self.view.cy = cy;
                self.view.cx = cx;
                Outcome::Continue
            }
            // Remaining control bytes and high bytes are ignored.
            Key::Byte(_) => Outcome::Continue,
        }
    }

    /// Save to the known filename and report the result in the message
    /// bar; failures never touch the in-memory buffer.
    pub(crate) fn save_file(&mut self) {
        match self.buffer.save() {
            Ok(bytes) => self.set_status(format!("{bytes} bytes written to disk")),
            Err(err) => {
                tracing::warn!(%err, "save failed");
                self.set_status(format!("Save failed: {err}"));
            }
        }
    }

    fn current_row_len(&self) -> usize {
        self.buffer.row(self.view.cy).map_or(0, Row::len)
    }

    fn delete_at_cursor(&mut self) {
        let (cy, cx) = self.buffer.delete_char(self.view.cy, self.view.cx);
        self.view.cy = cy;
        self.view.cx = cx;
    }

    /// Remove the entire current row and clamp the cursor to a valid
    /// position.
    fn delete_line(&mut self) {
        if self.view.cy < self.buffer.num_rows() {
            self.buffer.delete_row(self.view.cy);
            self.view.cy = self.view.cy.min(self.buffer.num_rows());
            self.view.cx = self.view.cx.min(self.current_row_len());
        }
    }

    /// One-cell cursor move with line wrap at horizontal boundaries and
    /// a column clamp after vertical moves.
    fn move_cursor(&mut self, key: Key) {
        match key {
            Key::ArrowLeft => {
                if self.view.cx > 0 {
                    self.view.cx -= 1;
                } else if self.view.cy > 0 {
                    self.view.cy -= 1;
                    self.view.cx = self.current_row_len();
                }
            }
            Key::ArrowRight => {
                if let Some(row) = self.buffer.row(self.view.cy) {
                    if self.view.cx < row.len() {
                        self.view.cx += 1;
                    } else {
                        self.view.cy += 1;
                        self.view.cx = 0;
                    }
                }
            }
            Key::ArrowUp => {
                self.view.cy = self.view.cy.saturating_sub(1);
            }
            Key::ArrowDown => {
                if self.view.cy < self.buffer.num_rows() {
                    self.view.cy += 1;
                }
            }
            _ => {}
        }
        self.view.cx = self.view.cx.min(self.current_row_len());
    }

    /// Snap to the top or bottom of the viewport, then replay one arrow
    /// step per visible row.
    fn page_move(&mut self, key: Key) {
        let step = if key == Key::PageUp {
            self.view.cy = self.view.rowoff;
            Key::ArrowUp
        } else {
            self.view.cy = (self.view.rowoff + self.view.screenrows)
                .saturating_sub(1)
                .min(self.buffer.num_rows());
            Key::ArrowDown
        };
        for _ in 0..self.view.screenrows {
            self.move_cursor(step);
        }
    }
}
