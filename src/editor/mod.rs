//! Editor: the owned aggregate of buffer, viewport, and session.
//!
//! [`EditorState`] holds everything the key dispatcher and the renderer
//! touch, with no terminal attached, so the editing logic is testable in
//! isolation. [`Editor`] pairs the state with a raw-mode [`Terminal`] and
//! drives the paint/read/apply loop.

pub mod controller;
pub mod render;
pub mod status;
pub mod viewport;

pub use controller::{Outcome, QUIT_CONFIRMATIONS};
pub use status::StatusMessage;
pub use viewport::Viewport;

use crate::buffer::TextBuffer;
use crate::error::Result;
use crate::terminal::{ctrl, FrameBuffer, Key, Terminal, WindowSize, BACKSPACE, ESC};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Rows reserved at the bottom for the status and message bars.
const RESERVED_ROWS: usize = 2;

/// The complete editing state: document, viewport, transient message,
/// and the quit-confirmation counter.
pub struct EditorState {
    pub(crate) buffer: TextBuffer,
    pub(crate) view: Viewport,
    pub(crate) status: Option<StatusMessage>,
    pub(crate) quit_remaining: u8,
}

impl EditorState {
    /// Create an empty state for a terminal of the given size.
    pub fn new(size: WindowSize) -> Self {
        Self {
            buffer: TextBuffer::new(),
            view: Viewport::new(size.rows.saturating_sub(RESERVED_ROWS), size.cols),
            status: None,
            quit_remaining: QUIT_CONFIRMATIONS,
        }
    }

    /// Load a file into the buffer.
    ///
    /// A missing file starts an empty buffer and reports a new file in
    /// the message bar instead of failing.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        if !self.buffer.load(path)? {
            self.set_status(format!("New file: {}", path.display()));
        }
        Ok(())
    }

    /// The document.
    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// The viewport.
    pub const fn view(&self) -> &Viewport {
        &self.view
    }

    /// Replace the status message.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::new(text));
    }

    /// The status text visible at `now`, if any.
    pub fn message(&self, now: Instant) -> Option<&str> {
        self.status.as_ref().and_then(|msg| msg.visible_text(now))
    }
}

/// The running editor: terminal session plus state plus frame buffer.
pub struct Editor {
    terminal: Terminal,
    frame: FrameBuffer,
    state: EditorState,
}

impl Editor {
    /// Enter raw mode, size the viewport, and optionally load a file.
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let terminal = Terminal::new()?;
        let size = terminal.size()?;
        let mut state = EditorState::new(size);
        if let Some(path) = path {
            state.open(&path)?;
        } else {
            state.set_status("HELP: Ctrl-S = save | Ctrl-K = delete line | Ctrl-Q = quit");
        }
        Ok(Self {
            terminal,
            frame: FrameBuffer::new(),
            state,
        })
    }

    /// Run until quit: paint a frame, read one key, apply it.
    ///
    /// On exit the screen is cleared; dropping the terminal restores the
    /// original attributes.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.refresh_screen()?;
            let key = self.terminal.read_key()?;
            match self.state.apply_key(key) {
                Outcome::Continue => {}
                Outcome::PromptSave => self.save_with_prompt()?,
                Outcome::Quit => break,
            }
        }
        self.terminal.clear_screen()
    }

    /// Compose one frame and flush it in a single write.
    fn refresh_screen(&mut self) -> Result<()> {
        self.state.view.scroll(&self.state.buffer);
        render::paint(&mut self.frame, &self.state, Instant::now());
        self.terminal.flush_frame(&self.frame)
    }

    /// Save flow for an unnamed buffer: prompt for a path first.
    fn save_with_prompt(&mut self) -> Result<()> {
        match self.prompt("Save as: ")? {
            Some(name) => {
                self.state.buffer.set_filename(name);
                self.state.save_file();
            }
            None => self.state.set_status("Save aborted"),
        }
        Ok(())
    }

    /// Single-line prompt rendered through the message bar.
    ///
    /// Enter with nonempty input accepts; ESC cancels; Backspace, Ctrl-H
    /// and Delete erase; printable bytes append. Returns `None` on
    /// cancel.
    fn prompt(&mut self, prefix: &str) -> Result<Option<String>> {
        let mut input = String::new();
        loop {
            self.state
                .set_status(format!("{prefix}{input} (ESC to cancel)"));
            self.refresh_screen()?;
            match self.terminal.read_key()? {
                Key::Byte(b'\r') if !input.is_empty() => {
                    self.state.status = None;
                    return Ok(Some(input));
                }
                Key::Byte(ESC) => {
                    self.state.status = None;
                    return Ok(None);
                }
                Key::Byte(BACKSPACE) | Key::Delete => {
                    input.pop();
                }
                Key::Byte(b) if b == ctrl(b'h') => {
                    input.pop();
                }
                Key::Byte(b) if !b.is_ascii_control() && b.is_ascii() => {
                    input.push(char::from(b));
                }
                _ => {}
            }
        }
    }
}
