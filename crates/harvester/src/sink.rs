//! Append-only JSONL persistence for paper records.
//!
//! The sink is a UTF-8 text file holding one JSON object per line. Appends
//! only: existing lines are never rewritten or truncated, and re-running
//! with an overlapping query produces duplicate lines by design.

use std::{
  fs::OpenOptions,
  io::{BufWriter, Write},
};

use super::*;
use crate::record::PaperRecord;

/// Line-oriented append log for [`PaperRecord`]s.
#[derive(Debug, Clone)]
pub struct JsonlSink {
  /// Destination file; parent directories are created on first append.
  path: PathBuf,
}

impl JsonlSink {
  /// Creates a sink for the given path. Nothing is touched on disk until
  /// [`JsonlSink::append`] is called.
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  /// The destination file path.
  pub fn path(&self) -> &Path { &self.path }

  /// Appends the records to the log, one JSON object per line, creating the
  /// file and any parent directories if absent. Returns the number of
  /// records written.
  pub fn append(&self, records: &[PaperRecord]) -> Result<usize> {
    if let Some(parent) = self.path.parent() {
      if !parent.as_os_str().is_empty() {
        std::fs::create_dir_all(parent)?;
      }
    }

    let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
    let mut writer = BufWriter::new(file);

    for record in records {
      serde_json::to_writer(&mut writer, record)?;
      writer.write_all(b"\n")?;
    }
    writer.flush()?;

    Ok(records.len())
  }
}
