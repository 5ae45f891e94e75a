//! A single buffer row: raw bytes plus their render projection.

/// Render columns per tab stop.
pub const TAB_STOP: usize = 4;

/// One line of the document.
///
/// `chars` holds the raw bytes as loaded or typed; `render` is the
/// display projection with tabs expanded to spaces. `render` is always a
/// pure function of `chars`: every mutation recomputes it before the row
/// can be painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    chars: Vec<u8>,
    render: Vec<u8>,
}

impl Row {
    /// Create a row from raw bytes.
    pub fn new(chars: Vec<u8>) -> Self {
        let mut row = Self {
            chars,
            render: Vec::new(),
        };
        row.update_render();
        row
    }

    /// Create an empty row.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The raw bytes.
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    /// The display projection.
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// Raw length in bytes.
    pub const fn len(&self) -> usize {
        self.chars.len()
    }

    /// Render length in cells.
    pub const fn render_len(&self) -> usize {
        self.render.len()
    }

    /// Check if the row holds no bytes.
    pub const fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Insert one byte at `at` (clamped to the row length).
    pub fn insert_byte(&mut self, at: usize, byte: u8) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, byte);
        self.update_render();
    }

    /// Remove the byte at `at`; out-of-range is a no-op.
    pub fn delete_byte(&mut self, at: usize) {
        if at < self.chars.len() {
            self.chars.remove(at);
            self.update_render();
        }
    }

    /// Append raw bytes (row join).
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.chars.extend_from_slice(bytes);
        self.update_render();
    }

    /// Truncate at `at` and return the suffix (row split).
    pub fn split_off(&mut self, at: usize) -> Vec<u8> {
        let suffix = self.chars.split_off(at);
        self.update_render();
        suffix
    }

    /// Project a raw byte index into its render column.
    ///
    /// Replays the tab rule over `chars[..cx]`; monotonically
    /// non-decreasing in `cx`, and the identity when the prefix has no
    /// tabs.
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for &byte in self.chars.iter().take(cx) {
            if byte == b'\t' {
                rx += (TAB_STOP - 1) - (rx % TAB_STOP);
            }
            rx += 1;
        }
        rx
    }

    /// Rebuild `render` from `chars`: each tab advances to the next
    /// multiple of [`TAB_STOP`] (at least one space), every other byte
    /// occupies one cell.
    fn update_render(&mut self) {
        self.render.clear();
        for &byte in &self.chars {
            if byte == b'\t' {
                self.render.push(b' ');
                while self.render.len() % TAB_STOP != 0 {
                    self.render.push(b' ');
                }
            } else {
                self.render.push(byte);
            }
        }
    }
}
