//! Cursor and scroll state mapping buffer coordinates to the screen.

use crate::buffer::TextBuffer;

/// The visible window into the buffer plus the cursor.
///
/// `cx`/`cy` live in raw-buffer space (`cy` may equal the row count,
/// denoting the virtual row past the end); `rx` is the render-space
/// projection of `cx`, recomputed every frame. `rowoff`/`coloff` are the
/// buffer coordinates of the window's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Cursor column in raw bytes.
    pub cx: usize,
    /// Cursor row.
    pub cy: usize,
    /// Cursor column in render cells.
    pub rx: usize,
    /// First visible row.
    pub rowoff: usize,
    /// First visible render column.
    pub coloff: usize,
    /// Visible content rows (status and message bars already reserved).
    pub screenrows: usize,
    /// Visible columns.
    pub screencols: usize,
}

impl Viewport {
    /// Create a viewport for a content area of `screenrows` x `screencols`.
    pub const fn new(screenrows: usize, screencols: usize) -> Self {
        Self {
            cx: 0,
            cy: 0,
            rx: 0,
            rowoff: 0,
            coloff: 0,
            screenrows,
            screencols,
        }
    }

    /// Recompute `rx` and clamp the scroll offsets around the cursor.
    ///
    /// Must run once per frame, before painting and before the cursor
    /// placement is derived. Afterwards the cursor lies inside the
    /// window: `rowoff <= cy < rowoff + screenrows` and
    /// `coloff <= rx < coloff + screencols`.
    pub fn scroll(&mut self, buffer: &TextBuffer) {
        self.rx = buffer
            .row(self.cy)
            .map_or(self.cx, |row| row.cx_to_rx(self.cx));

        if self.cy < self.rowoff {
            self.rowoff = self.cy;
        }
        if self.cy >= self.rowoff + self.screenrows {
            self.rowoff = self.cy - self.screenrows + 1;
        }
        if self.rx < self.coloff {
            self.coloff = self.rx;
        }
        if self.rx >= self.coloff + self.screencols {
            self.coloff = self.rx - self.screencols + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tall_buffer(rows: usize) -> TextBuffer {
        let mut buffer = TextBuffer::new();
        for i in 0..rows {
            buffer.insert_row(i, format!("line {i}").into_bytes());
        }
        buffer
    }

    #[test]
    fn test_scroll_down_past_window() {
        let buffer = tall_buffer(30);
        let mut view = Viewport::new(10, 80);
        view.cy = 15;
        view.scroll(&buffer);
        assert_eq!(view.rowoff, 6); // 15 - 10 + 1
    }

    #[test]
    fn test_scroll_back_above_window() {
        let buffer = tall_buffer(30);
        let mut view = Viewport::new(10, 80);
        view.rowoff = 20;
        view.cy = 3;
        view.scroll(&buffer);
        assert_eq!(view.rowoff, 3);
    }

    #[test]
    fn test_horizontal_scroll_clamps_around_rx() {
        let mut buffer = TextBuffer::new();
        buffer.insert_row(0, vec![b'x'; 200]);
        let mut view = Viewport::new(10, 80);

        view.cx = 120;
        view.scroll(&buffer);
        assert_eq!(view.rx, 120);
        assert_eq!(view.coloff, 120 - 80 + 1);

        view.cx = 5;
        view.scroll(&buffer);
        assert_eq!(view.coloff, 5);
    }

    #[test]
    fn test_rx_projects_tabs() {
        let mut buffer = TextBuffer::new();
        buffer.insert_row(0, b"\tabc".to_vec());
        let mut view = Viewport::new(10, 80);
        view.cx = 1;
        view.scroll(&buffer);
        assert_eq!(view.rx, 4);
    }

    #[test]
    fn test_rx_equals_cx_past_end_of_buffer() {
        let buffer = TextBuffer::new();
        let mut view = Viewport::new(10, 80);
        view.cx = 0;
        view.cy = 0;
        view.scroll(&buffer);
        assert_eq!(view.rx, 0);
        assert_eq!(view.rowoff, 0);
    }
}
