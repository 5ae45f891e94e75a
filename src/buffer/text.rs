//! The document: an ordered sequence of rows with file persistence.

use crate::buffer::row::Row;
use crate::error::Result;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

/// In-memory text document.
///
/// Rows are kept in document order. `dirty` counts unsaved mutations;
/// zero means the buffer matches what was last loaded or saved. The
/// filename is absent until the first load or save-as.
#[derive(Debug, Default)]
pub struct TextBuffer {
    rows: Vec<Row>,
    dirty: usize,
    filename: Option<PathBuf>,
}

impl TextBuffer {
    /// Create an empty, unnamed buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub const fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Get a row by index.
    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    /// Whether there are unsaved changes.
    pub const fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    /// The associated file path, if any.
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Associate a file path (save-as).
    pub fn set_filename(&mut self, path: impl Into<PathBuf>) {
        self.filename = Some(path.into());
    }

    /// Insert a row at `at`, shifting subsequent rows down.
    ///
    /// Out-of-range `at` is a no-op.
    pub fn insert_row(&mut self, at: usize, bytes: Vec<u8>) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(bytes));
        self.dirty += 1;
    }

    /// Delete the row at `at`, shifting subsequent rows up.
    ///
    /// Out-of-range `at` is a no-op.
    pub fn delete_row(&mut self, at: usize) {
        if at < self.rows.len() {
            self.rows.remove(at);
            self.dirty += 1;
        }
    }

    /// Insert byte `c` at `(cy, cx)` and return the cursor afterwards.
    ///
    /// A cursor on the virtual row past the end first materializes a
    /// fresh empty row.
    pub fn insert_char(&mut self, cy: usize, cx: usize, c: u8) -> (usize, usize) {
        if cy == self.rows.len() {
            self.rows.push(Row::empty());
        }
        self.rows[cy].insert_byte(cx, c);
        self.dirty += 1;
        (cy, cx + 1)
    }

    /// Break the line at `(cy, cx)` and return the cursor afterwards.
    ///
    /// At column 0 an empty row is inserted above, leaving the original
    /// content intact as row `cy + 1`; otherwise row `cy` keeps the
    /// prefix and a new row below takes the suffix. Either way the cursor
    /// lands at column 0 of row `cy + 1`.
    pub fn insert_newline(&mut self, cy: usize, cx: usize) -> (usize, usize) {
        if cx == 0 {
            self.insert_row(cy, Vec::new());
        } else if cy < self.rows.len() {
            let at = cx.min(self.rows[cy].len());
            let suffix = self.rows[cy].split_off(at);
            self.insert_row(cy + 1, suffix);
        } else {
            // Virtual row past the end: an Enter there just appends.
            self.insert_row(cy, Vec::new());
        }
        self.dirty += 1;
        (cy + 1, 0)
    }

    /// Delete the byte left of `(cy, cx)` and return the cursor afterwards.
    ///
    /// No-op at the true buffer start and on the virtual row past the
    /// end. At column 0 the current row is appended onto the previous row
    /// and removed, with the cursor placed at the join point.
    pub fn delete_char(&mut self, cy: usize, cx: usize) -> (usize, usize) {
        if cy == self.rows.len() || (cx == 0 && cy == 0) {
            return (cy, cx);
        }
        if cx > 0 {
            self.rows[cy].delete_byte(cx - 1);
            self.dirty += 1;
            (cy, cx - 1)
        } else {
            let merged = self.rows[cy].chars().to_vec();
            let prev_len = self.rows[cy - 1].len();
            self.rows[cy - 1].append_bytes(&merged);
            self.delete_row(cy);
            (cy - 1, prev_len)
        }
    }

    /// Serialize the buffer: each row's raw bytes followed by `\n`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let total: usize = self.rows.iter().map(|r| r.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(row.chars());
            out.push(b'\n');
        }
        out
    }

    /// Load the buffer from `path`, one row per line.
    ///
    /// Trailing `\n`/`\r` are stripped. A missing file is not an error:
    /// the buffer stays empty, keeps the filename, and `Ok(false)` lets
    /// the caller report a new file. Dirty resets to 0 on success.
    pub fn load(&mut self, path: &Path) -> Result<bool> {
        self.filename = Some(path.to_path_buf());
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                self.rows.clear();
                self.dirty = 0;
                return Ok(false);
            }
            Err(err) => return Err(err.into()),
        };

        self.rows.clear();
        let mut lines: Vec<&[u8]> = data.split(|&b| b == b'\n').collect();
        if data.last() == Some(&b'\n') {
            lines.pop();
        }
        for line in lines {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            self.rows.push(Row::new(line.to_vec()));
        }
        self.dirty = 0;
        tracing::info!(path = %path.display(), rows = self.rows.len(), "loaded file");
        Ok(true)
    }

    /// Write the buffer to its associated file and return the byte count.
    ///
    /// Opens create-if-missing with mode 0644, truncates to the exact new
    /// length, then writes everything in one call. This sequence is not
    /// atomic: an interruption between the truncate and the write can
    /// leave the file short. Dirty resets to 0 only on full success.
    pub fn save(&mut self) -> Result<usize> {
        let Some(path) = self.filename.clone() else {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "no filename set").into());
        };
        let bytes = self.to_bytes();
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .mode(0o644)
            .open(&path)?;
        file.set_len(bytes.len() as u64)?;
        file.write_all(&bytes)?;
        self.dirty = 0;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "saved file");
        Ok(bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn buffer_with(lines: &[&str]) -> TextBuffer {
        let mut buffer = TextBuffer::new();
        for (i, line) in lines.iter().enumerate() {
            buffer.insert_row(i, line.as_bytes().to_vec());
        }
        buffer
    }

    #[test]
    fn test_insert_and_delete_rows() {
        let mut buffer = buffer_with(&["one", "three"]);
        buffer.insert_row(1, b"two".to_vec());
        assert_eq!(buffer.num_rows(), 3);
        assert_eq!(buffer.row(1).unwrap().chars(), b"two");

        buffer.delete_row(0);
        assert_eq!(buffer.num_rows(), 2);
        assert_eq!(buffer.row(0).unwrap().chars(), b"two");

        buffer.delete_row(99); // no-op
        assert_eq!(buffer.num_rows(), 2);
    }

    #[test]
    fn test_insert_char_materializes_row_past_end() {
        let mut buffer = TextBuffer::new();
        assert!(!buffer.is_dirty());
        let cursor = buffer.insert_char(0, 0, b'H');
        assert_eq!(cursor, (0, 1));
        assert_eq!(buffer.num_rows(), 1);
        assert_eq!(buffer.row(0).unwrap().chars(), b"H");
        assert!(buffer.is_dirty());
    }

    #[test]
    fn test_insert_newline_at_column_zero_preserves_row_below() {
        let mut buffer = buffer_with(&["hello"]);
        let cursor = buffer.insert_newline(0, 0);
        assert_eq!(cursor, (1, 0));
        assert_eq!(buffer.row(0).unwrap().chars(), b"");
        assert_eq!(buffer.row(1).unwrap().chars(), b"hello");
    }

    #[test]
    fn test_insert_newline_splits_row() {
        let mut buffer = buffer_with(&["hello world"]);
        let cursor = buffer.insert_newline(0, 5);
        assert_eq!(cursor, (1, 0));
        assert_eq!(buffer.row(0).unwrap().chars(), b"hello");
        assert_eq!(buffer.row(1).unwrap().chars(), b" world");
    }

    #[test]
    fn test_delete_char_is_noop_at_buffer_start() {
        let mut buffer = buffer_with(&["abc"]);
        let dirty_before = buffer.is_dirty();
        let cursor = buffer.delete_char(0, 0);
        assert_eq!(cursor, (0, 0));
        assert_eq!(buffer.row(0).unwrap().chars(), b"abc");
        assert_eq!(buffer.is_dirty(), dirty_before);
    }

    #[test]
    fn test_delete_char_is_noop_past_end() {
        let mut buffer = buffer_with(&["abc"]);
        let cursor = buffer.delete_char(1, 0);
        assert_eq!(cursor, (1, 0));
        assert_eq!(buffer.num_rows(), 1);
    }

    #[test]
    fn test_delete_char_within_row() {
        let mut buffer = buffer_with(&["abc"]);
        let cursor = buffer.delete_char(0, 2);
        assert_eq!(cursor, (0, 1));
        assert_eq!(buffer.row(0).unwrap().chars(), b"ac");
    }

    #[test]
    fn test_delete_char_at_column_zero_joins_rows() {
        let mut buffer = buffer_with(&["hello", "world"]);
        let cursor = buffer.delete_char(1, 0);
        assert_eq!(cursor, (0, 5));
        assert_eq!(buffer.num_rows(), 1);
        assert_eq!(buffer.row(0).unwrap().chars(), b"helloworld");
    }

    #[test]
    fn test_to_bytes_has_trailing_newline_per_row() {
        let buffer = buffer_with(&["Hi", "Mom"]);
        assert_eq!(buffer.to_bytes(), b"Hi\nMom\n");
        assert_eq!(TextBuffer::new().to_bytes(), b"");
    }

    #[test]
    fn test_load_missing_file_reports_new() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("foo.txt");
        let mut buffer = TextBuffer::new();
        let existed = buffer.load(&path).unwrap();
        assert!(!existed);
        assert_eq!(buffer.num_rows(), 0);
        assert!(!buffer.is_dirty());
        assert_eq!(buffer.filename(), Some(path.as_path()));
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.txt");

        let mut buffer = buffer_with(&["alpha", "", "\tgamma"]);
        buffer.set_filename(&path);
        let written = buffer.save().unwrap();
        assert_eq!(written, b"alpha\n\n\tgamma\n".len());
        assert!(!buffer.is_dirty());

        let mut reloaded = TextBuffer::new();
        assert!(reloaded.load(&path).unwrap());
        assert_eq!(reloaded.num_rows(), 3);
        for i in 0..3 {
            assert_eq!(
                reloaded.row(i).unwrap().chars(),
                buffer.row(i).unwrap().chars()
            );
        }
    }

    #[test]
    fn test_load_strips_crlf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dos.txt");
        fs::write(&path, b"one\r\ntwo\r\n").unwrap();

        let mut buffer = TextBuffer::new();
        buffer.load(&path).unwrap();
        assert_eq!(buffer.num_rows(), 2);
        assert_eq!(buffer.row(0).unwrap().chars(), b"one");
        assert_eq!(buffer.row(1).unwrap().chars(), b"two");
    }

    #[test]
    fn test_edit_then_save_scenario() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("foo.txt");

        let mut buffer = TextBuffer::new();
        assert!(!buffer.load(&path).unwrap());

        let (mut cy, mut cx) = (0, 0);
        for &b in b"Hi" {
            (cy, cx) = buffer.insert_char(cy, cx, b);
        }
        (cy, cx) = buffer.insert_newline(cy, cx);
        for &b in b"Mom" {
            (cy, cx) = buffer.insert_char(cy, cx, b);
        }
        assert!(buffer.is_dirty());

        buffer.save().unwrap();
        assert!(!buffer.is_dirty());
        assert_eq!(fs::read(&path).unwrap(), b"Hi\nMom\n");
    }

    #[test]
    fn test_save_truncates_longer_previous_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.txt");
        fs::write(&path, b"a much longer previous content\n").unwrap();

        let mut buffer = buffer_with(&["short"]);
        buffer.set_filename(&path);
        buffer.save().unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"short\n");
    }
}
