// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSONL log of test records.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::TestRecord;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("could not open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("could not write record: {0}")]
    Write(#[from] io::Error),

    #[error("could not encode record: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("{}:{line}: invalid record: {source}", path.display())]
    Decode {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },
}

/// Appends one JSON object per record to a file.
///
/// Clones share the same writer.
#[derive(Clone)]
pub struct ReportLog {
    path: PathBuf,
    writer: Arc<Mutex<BufWriter<File>>>,
}

impl ReportLog {
    /// Open `path` for appending, creating it if needed.
    pub fn append_to(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| ReportError::Open {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            path,
            writer: Arc::new(Mutex::new(BufWriter::new(file))),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `record` and flush, so a crash loses nothing already logged.
    pub fn append(&self, record: &TestRecord) -> Result<(), ReportError> {
        let json = serde_json::to_string(record).map_err(ReportError::Encode)?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{json}")?;
        writer.flush()?;
        Ok(())
    }

    /// Read every record from a log file. Blank lines are skipped.
    pub fn read(path: impl AsRef<Path>) -> Result<Vec<TestRecord>, ReportError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ReportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|source| ReportError::Decode {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })?;
            records.push(record);
        }
        Ok(records)
    }
}

impl std::fmt::Debug for ReportLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportLog").field("path", &self.path).finish()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
