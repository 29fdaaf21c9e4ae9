use crate::results::ListingRecord;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while appending records
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to open or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Append-only sink writing one self-contained JSON record per line.
///
/// The destination handle is acquired per append and released before the call
/// returns, and each record plus its trailing newline goes out as a single
/// write. An interrupted run therefore leaves a valid prefix of whole lines.
pub struct RecordSink {
    path: PathBuf,
}

impl RecordSink {
    /// Opens the sink, verifying the destination is writable in append mode.
    ///
    /// An unopenable destination is fatal to the run, so this fails before any
    /// crawling starts rather than on the first record.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|source| SinkError::Io {
                path: path.clone(),
                source,
            })?;
        Ok(Self { path })
    }

    /// Appends one record and its line delimiter.
    pub fn append(&mut self, record: &ListingRecord) -> Result<(), SinkError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|source| SinkError::Io {
                path: self.path.clone(),
                source,
            })?;
        file.write_all(line.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| SinkError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(())
    }
}
