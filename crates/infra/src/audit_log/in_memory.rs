use std::sync::RwLock;

use super::AuditLog;
use crate::catalog_store::StoreError;

/// In-memory audit log for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    lines: RwLock<Vec<String>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        match self.lines.read() {
            Ok(lines) => lines.clone(),
            Err(_) => vec![],
        }
    }
}

impl AuditLog for InMemoryAuditLog {
    fn append(&self, line: &str) -> Result<(), StoreError> {
        let mut lines = self
            .lines
            .write()
            .map_err(|_| StoreError::Storage("audit log lock poisoned".to_string()))?;
        lines.push(line.to_string());
        Ok(())
    }
}
