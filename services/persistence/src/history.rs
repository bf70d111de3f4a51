//! Append-only timestamped line writer
//!
//! One writer per output file. Lines are buffered through `BufWriter` and
//! flushed per the configured policy; the default flushes every write so a
//! crash loses at most the line being written.

use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Timestamp layout used at the head of every persisted line.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Controls when buffered lines are flushed to the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Flush after every line.
    EveryWrite,
    /// Flush every N lines.
    EveryN(usize),
}

/// Append-only writer for one history file.
pub struct HistoryWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    flush_policy: FlushPolicy,
    writes_since_flush: usize,
    lines_written: u64,
}

impl HistoryWriter {
    /// Open (creating parents as needed) with the default every-write
    /// flush policy.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        Self::with_policy(path, FlushPolicy::EveryWrite)
    }

    pub fn with_policy(
        path: impl Into<PathBuf>,
        flush_policy: FlushPolicy,
    ) -> Result<Self, HistoryError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
            flush_policy,
            writes_since_flush: 0,
            lines_written: 0,
        })
    }

    /// Append a raw line.
    pub fn append_line(&mut self, text: &str) -> Result<(), HistoryError> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.lines_written += 1;
        self.writes_since_flush += 1;
        self.apply_flush_policy()?;
        Ok(())
    }

    /// Append a line prefixed with a millisecond wall-clock timestamp.
    pub fn append_timestamped(&mut self, text: &str) -> Result<(), HistoryError> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        self.append_line(&format!("{timestamp},{text}"))
    }

    /// Force-flush buffered lines.
    pub fn sync(&mut self) -> Result<(), HistoryError> {
        self.writer.flush()?;
        self.writes_since_flush = 0;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    fn apply_flush_policy(&mut self) -> Result<(), HistoryError> {
        let should_flush = match self.flush_policy {
            FlushPolicy::EveryWrite => true,
            FlushPolicy::EveryN(n) => self.writes_since_flush >= n,
        };
        if should_flush {
            self.writer.flush()?;
            self.writes_since_flush = 0;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_creates_file_with_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("positions.txt");
        let mut writer = HistoryWriter::open(&path).unwrap();

        writer.append_line("912828M80,TRSY1,1000000").unwrap();
        writer.append_line("912828M80,TRSY1,4000000").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert_eq!(writer.lines_written(), 2);
    }

    #[test]
    fn test_append_timestamped_prefixes_timestamp() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("risk.txt");
        let mut writer = HistoryWriter::open(&path).unwrap();

        writer.append_timestamped("9128283H1,0.185,1000000").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let line = content.lines().next().unwrap();
        // timestamp, then the record
        let (timestamp, rest) = line.split_once(',').unwrap();
        assert!(timestamp.contains(':') && timestamp.contains('.'));
        assert_eq!(rest, "9128283H1,0.185,1000000");
    }

    #[test]
    fn test_creates_missing_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out").join("nested").join("gui.txt");
        let mut writer = HistoryWriter::open(&path).unwrap();
        writer.append_line("x").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_reopen_appends() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("executions.txt");

        {
            let mut writer = HistoryWriter::open(&path).unwrap();
            writer.append_line("first").unwrap();
        }
        {
            let mut writer = HistoryWriter::open(&path).unwrap();
            writer.append_line("second").unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_every_write_flushes_immediately() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("streaming.txt");
        let mut writer = HistoryWriter::open(&path).unwrap();

        writer.append_line("line").unwrap();
        // visible on disk without sync or drop
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_every_n_defers_flush() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("batched.txt");
        let mut writer = HistoryWriter::with_policy(&path, FlushPolicy::EveryN(100)).unwrap();

        writer.append_line("buffered").unwrap();
        writer.sync().unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "buffered\n");
    }
}
