//! Window geometry.
//!
//! The primary path asks the kernel via `TIOCGWINSZ`. Some terminals
//! (and some pty layers) report zero columns or fail outright; the
//! fallback parks the cursor at the far bottom-right and asks the
//! terminal itself for a cursor-position report.

use crate::error::{Error, Result};
use crate::terminal::raw::read_byte;
use std::io::{self, Write};
use std::mem::MaybeUninit;

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    /// Total rows.
    pub rows: usize,
    /// Total columns.
    pub cols: usize,
}

/// Query the terminal's current size.
///
/// # Errors
///
/// Returns [`Error::WindowSize`] when both the ioctl and the cursor-probe
/// fallback fail to produce a usable size.
pub fn query() -> Result<WindowSize> {
    if let Some(size) = ioctl_size() {
        return Ok(size);
    }
    tracing::debug!("TIOCGWINSZ unavailable, falling back to cursor probe");
    probe_size()
}

fn ioctl_size() -> Option<WindowSize> {
    let mut ws = MaybeUninit::<libc::winsize>::uninit();
    let rc = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, ws.as_mut_ptr()) };
    if rc != 0 {
        return None;
    }
    let ws = unsafe { ws.assume_init() };
    if ws.ws_col == 0 {
        return None;
    }
    Some(WindowSize {
        rows: ws.ws_row as usize,
        cols: ws.ws_col as usize,
    })
}

/// Move the cursor to the bottom-right corner (the terminal clamps the
/// large relative moves at its edges) and parse the cursor-position
/// report.
fn probe_size() -> Result<WindowSize> {
    let mut stdout = io::stdout();
    stdout.write_all(b"\x1b[999C\x1b[998B")?;
    stdout.write_all(b"\x1b[6n")?;
    stdout.flush()?;

    // Reply shape: ESC [ rows ; cols R
    let mut reply = Vec::with_capacity(16);
    while reply.len() < 32 {
        match read_byte()? {
            Some(b'R') => break,
            Some(byte) => reply.push(byte),
            None => break,
        }
    }

    parse_position_report(&reply).ok_or(Error::WindowSize)
}

fn parse_position_report(reply: &[u8]) -> Option<WindowSize> {
    let body = reply.strip_prefix(b"\x1b[")?;
    let body = std::str::from_utf8(body).ok()?;
    let (rows, cols) = body.split_once(';')?;
    Some(WindowSize {
        rows: rows.parse().ok()?,
        cols: cols.parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position_report() {
        let size = parse_position_report(b"\x1b[24;80").unwrap();
        assert_eq!(size, WindowSize { rows: 24, cols: 80 });
    }

    #[test]
    fn test_parse_rejects_malformed_reports() {
        assert!(parse_position_report(b"").is_none());
        assert!(parse_position_report(b"24;80").is_none());
        assert!(parse_position_report(b"\x1b[24").is_none());
        assert!(parse_position_report(b"\x1b[a;b").is_none());
    }
}
