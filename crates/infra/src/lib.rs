//! Infrastructure layer: configuration, file-backed storage, the inventory service.

pub mod audit_log;
pub mod catalog_store;
pub mod config;
pub mod inventory_store;


pub use audit_log::{AuditLog, FileAuditLog, InMemoryAuditLog};
pub use catalog_store::{CatalogLoadError, CatalogStore, InMemoryCatalogStore, JsonFileCatalogStore, StoreError};
pub use config::StoreConfig;
pub use inventory_store::{InventoryStore, PurchaseError};
