use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use stockroom_inventory::Catalog;

use super::{CatalogLoadError, CatalogStore, StoreError, decode, encode};

/// Catalog kept as a UTF-8 JSON file.
///
/// Saves go through a temporary file in the same directory that is renamed
/// over the target, so a crash mid-write leaves the previous catalog intact.
#[derive(Debug, Clone)]
pub struct JsonFileCatalogStore {
    path: PathBuf,
}

impl JsonFileCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            location: self.location(),
            source,
        }
    }
}

impl CatalogStore for JsonFileCatalogStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Catalog, CatalogLoadError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(CatalogLoadError::Missing {
                    location: self.location(),
                });
            }
            Err(source) => {
                return Err(CatalogLoadError::Io {
                    location: self.location(),
                    source,
                });
            }
        };
        decode(&self.location(), &text)
    }

    fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        let document = encode(catalog)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(document.as_bytes()).map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        tracing::debug!(path = %self.path.display(), bytes = document.len(), "catalog saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::Money;
    use stockroom_inventory::Item;

    fn sample() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert_item(
            "electronics".parse().unwrap(),
            "laptop".parse().unwrap(),
            Item::new("Laptop", Money::from_units(1000), 5),
        );
        catalog
    }

    #[test]
    fn missing_file_is_reported_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileCatalogStore::new(dir.path().join("inventory.json"));
        assert!(matches!(store.load(), Err(CatalogLoadError::Missing { .. })));
    }

    #[test]
    fn unparseable_file_is_reported_as_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileCatalogStore::new(&path);
        assert!(matches!(store.load(), Err(CatalogLoadError::Corrupt { .. })));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileCatalogStore::new(dir.path().join("inventory.json"));

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), sample());

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\n  \"electronics\": {"));
        assert!(text.contains("\"price\": 1000"));
    }

    #[test]
    fn save_replaces_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileCatalogStore::new(dir.path().join("inventory.json"));
        store.save(&sample()).unwrap();
        store.save(&Catalog::new()).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{}");
        // no stray temporary files left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileCatalogStore::new(dir.path().join("nope").join("inventory.json"));
        assert!(matches!(store.save(&sample()), Err(StoreError::Io { .. })));
    }
}
