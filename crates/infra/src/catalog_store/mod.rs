//! Catalog storage abstractions.
//!
//! The catalog is a single document: every load reads all of it and every save
//! replaces all of it.

pub mod in_memory;
pub mod json_file;

use std::sync::Arc;

use thiserror::Error;

use stockroom_inventory::Catalog;

pub use in_memory::InMemoryCatalogStore;
pub use json_file::JsonFileCatalogStore;

/// Why a catalog could not be loaded.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// Nothing stored yet (legitimately empty).
    #[error("no catalog at {location}")]
    Missing { location: String },

    /// A document exists but does not parse as a catalog.
    #[error("catalog at {location} is corrupt: {source}")]
    Corrupt {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read catalog at {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
}

/// Write-side storage failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode catalog: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Whole-document catalog store.
pub trait CatalogStore: Send + Sync {
    /// Human-readable location, used in logs and errors.
    fn location(&self) -> String;

    fn load(&self) -> Result<Catalog, CatalogLoadError>;

    /// Replace the stored catalog. Readers see either the old or the new
    /// document, never a partial one.
    fn save(&self, catalog: &Catalog) -> Result<(), StoreError>;
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn location(&self) -> String {
        (**self).location()
    }

    fn load(&self) -> Result<Catalog, CatalogLoadError> {
        (**self).load()
    }

    fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        (**self).save(catalog)
    }
}

/// Parse a stored document.
pub(crate) fn decode(location: &str, text: &str) -> Result<Catalog, CatalogLoadError> {
    serde_json::from_str(text).map_err(|source| CatalogLoadError::Corrupt {
        location: location.to_string(),
        source,
    })
}

/// Render a catalog the way it is stored: pretty-printed, two-space indent.
pub(crate) fn encode(catalog: &Catalog) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(catalog)?)
}
