//! Raw-mode session management.
//!
//! Entering raw mode rewrites the termios state of the controlling
//! terminal; the original state is captured first and restored by
//! [`RawModeGuard`]'s `Drop` impl, so every exit path (normal quit, fatal
//! error propagation, panic unwind) puts the terminal back. Termination
//! by an external signal bypasses `Drop` and is a known gap.

use crate::error::{Error, Result};
use std::io;
use std::mem::MaybeUninit;

fn tcgetattr(fd: libc::c_int) -> Result<libc::termios> {
    let mut termios = MaybeUninit::<libc::termios>::uninit();
    if unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) } != 0 {
        return Err(Error::Termios(io::Error::last_os_error()));
    }
    Ok(unsafe { termios.assume_init() })
}

fn tcsetattr(fd: libc::c_int, termios: &libc::termios) -> Result<()> {
    if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) } != 0 {
        return Err(Error::Termios(io::Error::last_os_error()));
    }
    Ok(())
}

/// Scoped raw-mode session.
///
/// Construction switches stdin to raw mode; dropping the guard restores
/// the saved attributes.
pub struct RawModeGuard {
    original: libc::termios,
}

impl RawModeGuard {
    /// Enter raw mode on stdin.
    ///
    /// Disables input CR->NL translation and flow control, output
    /// post-processing, echo, canonical input, literal-next, and signal
    /// generation, plus the conventional BRKINT/INPCK/ISTRIP/CS8
    /// adjustments. The read primitive is configured with VMIN=0 and
    /// VTIME=1: `read` returns after at most 100ms even with no data,
    /// which callers treat as a polling-style blocking read.
    pub fn enable() -> Result<Self> {
        let original = tcgetattr(libc::STDIN_FILENO)?;

        let mut raw = original;
        raw.c_iflag &= !(libc::ICRNL | libc::IXON | libc::BRKINT | libc::INPCK | libc::ISTRIP);
        raw.c_oflag &= !libc::OPOST;
        raw.c_cflag |= libc::CS8;
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
        raw.c_cc[libc::VMIN] = 0;
        raw.c_cc[libc::VTIME] = 1; // deciseconds

        tcsetattr(libc::STDIN_FILENO, &raw)?;
        Ok(Self { original })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Nothing sensible to do with a failure here; the process is on
        // its way out and stderr may still be in raw mode.
        let _ = tcsetattr(libc::STDIN_FILENO, &self.original);
    }
}

/// Read a single byte from stdin.
///
/// Returns `Ok(None)` when the VTIME window elapsed with no data. `EAGAIN`
/// is folded into the no-data case (some platforms report the timeout that
/// way instead of returning 0).
pub(crate) fn read_byte() -> Result<Option<u8>> {
    let mut buf = [0u8; 1];
    let n = unsafe { libc::read(libc::STDIN_FILENO, buf.as_mut_ptr().cast(), 1) };
    match n {
        1 => Ok(Some(buf[0])),
        0 => Ok(None),
        _ => {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::WouldBlock {
                Ok(None)
            } else {
                Err(err.into())
            }
        }
    }
}
