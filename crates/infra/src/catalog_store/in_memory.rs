use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use stockroom_inventory::Catalog;

use super::{CatalogLoadError, CatalogStore, StoreError, decode, encode};

const LOCATION: &str = "<memory>";

/// In-memory catalog store for tests/dev.
///
/// Keeps the encoded document text, so it behaves like the file store with
/// respect to missing and corrupt documents.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    document: RwLock<Option<String>>,
    fail_saves: AtomicBool,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding `text` verbatim (need not be valid JSON).
    pub fn with_document(text: impl Into<String>) -> Self {
        Self {
            document: RwLock::new(Some(text.into())),
            fail_saves: AtomicBool::new(false),
        }
    }

    pub fn with_catalog(catalog: &Catalog) -> Result<Self, StoreError> {
        Ok(Self::with_document(encode(catalog)?))
    }

    /// Current document text, if any.
    pub fn document(&self) -> Option<String> {
        self.document.read().ok()?.clone()
    }

    /// Make every subsequent save fail (simulates a full disk).
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn location(&self) -> String {
        LOCATION.to_string()
    }

    fn load(&self) -> Result<Catalog, CatalogLoadError> {
        let document = self.document();
        match document {
            Some(text) => decode(LOCATION, &text),
            None => Err(CatalogLoadError::Missing {
                location: LOCATION.to_string(),
            }),
        }
    }

    fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Storage("simulated write failure".to_string()));
        }
        let text = encode(catalog)?;
        let mut document = self
            .document
            .write()
            .map_err(|_| StoreError::Storage("catalog lock poisoned".to_string()))?;
        *document = Some(text);
        Ok(())
    }
}
