use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::AuditLog;
use crate::catalog_store::StoreError;

/// Audit log appended to a UTF-8 text file, one line per entry.
#[derive(Debug, Clone)]
pub struct FileAuditLog {
    path: PathBuf,
}

impl FileAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditLog for FileAuditLog {
    fn append(&self, line: &str) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            location: self.path.display().to_string(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_error)?;
        // Single write so concurrent appenders do not interleave within a line.
        file.write_all(format!("{line}\n").as_bytes()).map_err(io_error)?;
        Ok(())
    }
}
