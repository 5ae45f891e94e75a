//! Key events and the escape-sequence decoder.
//!
//! The terminal delivers keystrokes as single bytes, except for the
//! special keys (arrows, Home/End, Delete, Page Up/Down) which arrive as
//! multi-byte escape sequences. [`decode`] turns one leading byte plus a
//! byte source into a logical [`Key`].

use crate::error::Result;
use crate::terminal::raw::read_byte;

/// The escape byte.
pub const ESC: u8 = 0x1b;

/// The backspace byte (DEL on most terminals).
pub const BACKSPACE: u8 = 127;

/// Map a letter to its Ctrl-chord byte (clears the top three bits).
#[inline]
pub const fn ctrl(key: u8) -> u8 {
    key & 0x1f
}

/// A logical key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A literal byte: printable characters, control chords, ESC itself.
    Byte(u8),
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Delete key (forward delete).
    Delete,
}

/// Block until one key event is available.
///
/// The VMIN=0/VTIME=1 read returns empty roughly every 100ms; those
/// timeouts are swallowed here, so the caller observes a blocking read.
pub fn read_key() -> Result<Key> {
    loop {
        if let Some(byte) = read_byte()? {
            return decode(byte, read_byte);
        }
    }
}

/// Decode one key event from a leading byte and a byte source.
///
/// `next` yields follow-up bytes and `Ok(None)` on a short read. Any
/// sequence not in the recognized set decays to a plain ESC byte.
pub fn decode(first: u8, mut next: impl FnMut() -> Result<Option<u8>>) -> Result<Key> {
    if first != ESC {
        return Ok(Key::Byte(first));
    }

    let Some(seq0) = next()? else {
        return Ok(Key::Byte(ESC));
    };
    let Some(seq1) = next()? else {
        return Ok(Key::Byte(ESC));
    };

    let key = match (seq0, seq1) {
        (b'[', b'A') => Key::ArrowUp,
        (b'[', b'B') => Key::ArrowDown,
        (b'[', b'C') => Key::ArrowRight,
        (b'[', b'D') => Key::ArrowLeft,
        (b'[', b'H') | (b'O', b'H') => Key::Home,
        (b'[', b'F') | (b'O', b'F') => Key::End,
        (b'[', digit @ b'0'..=b'9') => {
            // Extended sequences terminate with '~'.
            let Some(b'~') = next()? else {
                return Ok(Key::Byte(ESC));
            };
            match digit {
                b'1' | b'7' => Key::Home,
                b'2' | b'8' => Key::End,
                b'3' => Key::Delete,
                b'5' => Key::PageUp,
                b'6' => Key::PageDown,
                _ => Key::Byte(ESC),
            }
        }
        _ => Key::Byte(ESC),
    };
    Ok(key)
}
