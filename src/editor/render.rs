//! Frame composition: content rows, status bar, message bar, cursor.

use crate::editor::EditorState;
use crate::terminal::FrameBuffer;
use std::time::Instant;

/// Longest byte count of the filename shown in the status bar.
const STATUS_NAME_WIDTH: usize = 20;

/// Compose one full frame into `frame`.
///
/// The caller must have run the viewport scroll recompute first; the
/// cursor placement at the end of the frame assumes the offsets already
/// contain the cursor.
pub(crate) fn paint(frame: &mut FrameBuffer, state: &EditorState, now: Instant) {
    frame.clear();
    frame.cursor_hide();
    frame.cursor_home();

    draw_rows(frame, state);
    draw_status_bar(frame, state);
    draw_message_bar(frame, state, now);

    let view = &state.view;
    frame.cursor_move(view.cy - view.rowoff, view.rx - view.coloff);
    frame.cursor_show();
}

fn draw_rows(frame: &mut FrameBuffer, state: &EditorState) {
    let view = &state.view;
    for y in 0..view.screenrows {
        let filerow = y + view.rowoff;
        if let Some(row) = state.buffer.row(filerow) {
            let render = row.render();
            let start = view.coloff.min(render.len());
            let end = (view.coloff + view.screencols).min(render.len());
            frame.write_raw(&render[start..end]);
        } else if state.buffer.num_rows() == 0 && y == view.screenrows / 3 {
            draw_welcome(frame, view.screencols);
        } else {
            frame.write_str("~");
        }
        frame.erase_line();
        frame.write_str("\r\n");
    }
}

fn draw_welcome(frame: &mut FrameBuffer, screencols: usize) {
    let welcome = concat!("Quill editor -- version ", env!("CARGO_PKG_VERSION"));
    let welcome = truncated(welcome, screencols);
    let mut padding = (screencols - welcome.len()) / 2;
    if padding > 0 {
        frame.write_str("~");
        padding -= 1;
    }
    for _ in 0..padding {
        frame.write_str(" ");
    }
    frame.write_str(welcome);
}

/// Inverted-video bar: name, line count and modified marker on the left,
/// `cursor-row/row-count` right-justified, spaces between. Always exactly
/// `screencols` cells.
fn draw_status_bar(frame: &mut FrameBuffer, state: &EditorState) {
    let view = &state.view;
    let buffer = &state.buffer;
    frame.invert();

    let name = buffer
        .filename()
        .map_or_else(|| "[No Name]".to_string(), |p| p.display().to_string());
    let mut left = format!(
        "{:.width$} - {} lines",
        name,
        buffer.num_rows(),
        width = STATUS_NAME_WIDTH
    );
    if buffer.is_dirty() {
        left.push_str(" (modified)");
    }
    let left = truncated(&left, view.screencols);
    let right = format!("{}/{}", view.cy + 1, buffer.num_rows());

    frame.write_str(left);
    let mut len = left.len();
    while len < view.screencols {
        if view.screencols - len == right.len() {
            frame.write_str(&right);
            break;
        }
        frame.write_str(" ");
        len += 1;
    }

    frame.normal();
    frame.write_str("\r\n");
}

fn draw_message_bar(frame: &mut FrameBuffer, state: &EditorState, now: Instant) {
    frame.erase_line();
    if let Some(text) = state.message(now) {
        frame.write_str(truncated(text, state.view.screencols));
    }
}

/// Byte-length truncation that never splits a UTF-8 character.
fn truncated(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::WindowSize;

    fn small_state(lines: &[&str]) -> EditorState {
        let mut state = EditorState::new(WindowSize { rows: 6, cols: 40 });
        for (i, line) in lines.iter().enumerate() {
            state.buffer.insert_row(i, line.as_bytes().to_vec());
        }
        state
    }

    fn painted(state: &mut EditorState) -> String {
        state.view.scroll(&state.buffer);
        let mut frame = FrameBuffer::new();
        paint(&mut frame, state, Instant::now());
        String::from_utf8(frame.as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn test_frame_brackets_cursor_visibility() {
        let mut state = small_state(&["hello"]);
        let out = painted(&mut state);
        assert!(out.starts_with("\x1b[?25l\x1b[H"));
        assert!(out.ends_with("\x1b[?25h"));
    }

    #[test]
    fn test_rows_past_end_get_tildes() {
        let mut state = small_state(&["hello"]);
        let out = painted(&mut state);
        assert!(out.contains("hello\x1b[K\r\n"));
        assert!(out.contains("~\x1b[K\r\n"));
    }

    #[test]
    fn test_welcome_banner_only_on_empty_buffer() {
        let mut empty = small_state(&[]);
        let out = painted(&mut empty);
        assert!(out.contains("Quill editor -- version"));

        let mut nonempty = small_state(&["x"]);
        let out = painted(&mut nonempty);
        assert!(!out.contains("Quill editor"));
    }

    #[test]
    fn test_status_bar_sections() {
        let mut state = small_state(&["one", "two"]);
        state.buffer.set_filename("notes.txt");
        let out = painted(&mut state);
        assert!(out.contains("\x1b[7m"));
        assert!(out.contains("notes.txt - 2 lines"));
        assert!(out.contains("(modified)"));
        assert!(out.contains("1/2\x1b[m"));
    }

    #[test]
    fn test_status_bar_no_name_placeholder() {
        let mut state = small_state(&[]);
        let out = painted(&mut state);
        assert!(out.contains("[No Name] - 0 lines"));
    }

    #[test]
    fn test_status_bar_is_exactly_screen_width() {
        let mut state = small_state(&["a"]);
        let out = painted(&mut state);
        let bar = out
            .split("\x1b[7m")
            .nth(1)
            .and_then(|s| s.split("\x1b[m").next())
            .unwrap();
        assert_eq!(bar.len(), state.view.screencols);
    }

    #[test]
    fn test_message_bar_shows_fresh_message() {
        let mut state = small_state(&["a"]);
        state.set_status("hello there");
        let out = painted(&mut state);
        assert!(out.contains("hello there"));
    }

    #[test]
    fn test_content_sliced_by_column_offset() {
        let mut state = small_state(&[]);
        state.buffer.insert_row(0, vec![b'x'; 100]);
        state.view.cx = 100;
        let out = painted(&mut state);
        // coloff = 100 - 40 + 1 = 61, so 39 cells remain visible.
        assert!(out.contains(&"x".repeat(39)));
        assert!(!out.contains(&"x".repeat(40)));
    }

    #[test]
    fn test_cursor_position_accounts_for_offsets() {
        let mut state = small_state(&[]);
        for i in 0..20 {
            state.buffer.insert_row(i, format!("l{i}").into_bytes());
        }
        state.view.cy = 10;
        state.view.cx = 1;
        let out = painted(&mut state);
        // screenrows = 4, rowoff = 10 - 4 + 1 = 7 -> screen row 3 (1-indexed 4).
        assert!(out.ends_with("\x1b[4;2H\x1b[?25h"));
    }

    #[test]
    fn test_truncated_respects_char_boundaries() {
        assert_eq!(truncated("abcdef", 3), "abc");
        assert_eq!(truncated("ab", 10), "ab");
        // Multi-byte char straddling the cut point is dropped whole.
        assert_eq!(truncated("aé", 2), "a");
    }
}
