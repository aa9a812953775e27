//! Append-only audit log.
//!
//! The core only ever appends; nothing here reads the log back.

pub mod file;
pub mod in_memory;

use std::sync::Arc;

use crate::catalog_store::StoreError;

pub use file::FileAuditLog;
pub use in_memory::InMemoryAuditLog;

pub trait AuditLog: Send + Sync {
    /// Append one line. `line` must not contain a line break.
    fn append(&self, line: &str) -> Result<(), StoreError>;
}

impl<L> AuditLog for Arc<L>
where
    L: AuditLog + ?Sized,
{
    fn append(&self, line: &str) -> Result<(), StoreError> {
        (**self).append(line)
    }
}
