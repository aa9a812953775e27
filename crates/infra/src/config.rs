//! Configuration loading and representation.

use std::path::{Path, PathBuf};

pub const CATALOG_PATH_ENV: &str = "STOCKROOM_CATALOG_PATH";
pub const AUDIT_LOG_PATH_ENV: &str = "STOCKROOM_AUDIT_LOG_PATH";

pub const DEFAULT_CATALOG_FILE: &str = "inventory.json";
pub const DEFAULT_AUDIT_LOG_FILE: &str = "logs.txt";

/// Where the inventory store keeps its two files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub catalog_path: PathBuf,
    pub audit_log_path: PathBuf,
}

impl StoreConfig {
    pub fn new(catalog_path: impl Into<PathBuf>, audit_log_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            audit_log_path: audit_log_path.into(),
        }
    }

    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(DEFAULT_CATALOG_FILE), dir.join(DEFAULT_AUDIT_LOG_FILE))
    }

    /// Read `STOCKROOM_CATALOG_PATH` / `STOCKROOM_AUDIT_LOG_PATH`, falling back
    /// to the default file names in the working directory.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let resolve = |name: &str, default: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            catalog_path: resolve(CATALOG_PATH_ENV, DEFAULT_CATALOG_FILE),
            audit_log_path: resolve(AUDIT_LOG_PATH_ENV, DEFAULT_AUDIT_LOG_FILE),
        }
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }

    pub fn with_audit_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.audit_log_path = path.into();
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_FILE, DEFAULT_AUDIT_LOG_FILE)
    }
}
