#![deny(unused)]
//! Submission recording for Concierge.
//!
//! An append-only JSONL log of modal form submissions. One JSON object per
//! line, appended to a single configured file with no rotation, no size
//! limit, and no read-back. Ordering between concurrent appenders is
//! whatever the OS append primitive provides.

use async_trait::async_trait;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use concierge_core::{traits::SubmissionStore, types::SubmissionRecord, Error, Result};

/// File-backed submission log.
pub struct FileSubmissionStore {
    path: PathBuf,
}

impl FileSubmissionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }
}

#[async_trait]
impl SubmissionStore for FileSubmissionStore {
    async fn append(&self, record: &SubmissionRecord) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.write_line(&line)
            .map_err(|e| Error::storage(format!("append to {:?} failed: {}", self.path, e)))?;

        tracing::debug!(path = ?self.path, action = %record.action, "Submission recorded");
        Ok(())
    }
}
