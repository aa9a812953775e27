//! The inventory service: load the catalog, run a purchase, persist, audit.
//!
//! ```text
//! PurchaseItem
//!   ↓
//! 1. Load catalog (fresh, every call)
//!   ↓
//! 2. Decide (pure: approve or reject)
//!   ↓
//! 3. Apply + save (approved only; rolled back if the save fails)
//!   ↓
//! 4. Append exactly one audit line
//! ```
//!
//! `buy` holds a writer lock across steps 1–4 so callers sharing one
//! `InventoryStore` never lose updates. Separate processes writing the same
//! file are not coordinated.

use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use stockroom_core::DomainError;
use stockroom_inventory::{Catalog, ItemPurchased, PurchaseItem, PurchaseRecord, PurchaseRejected};

use crate::audit_log::{AuditLog, FileAuditLog};
use crate::catalog_store::{CatalogLoadError, CatalogStore, JsonFileCatalogStore, StoreError};
use crate::config::StoreConfig;

#[derive(Debug, Error)]
pub enum PurchaseError {
    /// Expected business outcome (not found, insufficient stock, bad input).
    #[error(transparent)]
    Rejected(#[from] PurchaseRejected),

    /// The approved purchase no longer matches the catalog it is applied to.
    #[error("purchase could not be applied: {0}")]
    Inconsistent(#[source] DomainError),

    /// The approved purchase could not be saved; nothing was sold.
    #[error("purchase could not be saved: {0}")]
    Persistence(#[source] StoreError),
}

impl PurchaseError {
    /// `true` for outcomes a caller should display and carry on from.
    pub fn is_rejection(&self) -> bool {
        matches!(self, PurchaseError::Rejected(_))
    }

    pub fn rejection(&self) -> Option<&PurchaseRejected> {
        match self {
            PurchaseError::Rejected(rejection) => Some(rejection),
            PurchaseError::Inconsistent(_) | PurchaseError::Persistence(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct InventoryStore<C, A> {
    catalog_store: C,
    audit_log: A,
    writer: Mutex<()>,
}

impl InventoryStore<JsonFileCatalogStore, FileAuditLog> {
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(
            JsonFileCatalogStore::new(&config.catalog_path),
            FileAuditLog::new(&config.audit_log_path),
        )
    }
}

impl<C, A> InventoryStore<C, A>
where
    C: CatalogStore,
    A: AuditLog,
{
    pub fn new(catalog_store: C, audit_log: A) -> Self {
        Self {
            catalog_store,
            audit_log,
            writer: Mutex::new(()),
        }
    }

    pub fn catalog_store(&self) -> &C {
        &self.catalog_store
    }

    pub fn audit_log(&self) -> &A {
        &self.audit_log
    }

    /// Load the catalog, treating a missing or corrupt document as empty.
    ///
    /// The two cases are logged differently: missing at `debug`, corrupt at
    /// `warn`. Use [`InventoryStore::try_load_catalog`] to tell them apart.
    pub fn load_catalog(&self) -> Catalog {
        match self.try_load_catalog() {
            Ok(catalog) => catalog,
            Err(CatalogLoadError::Missing { location }) => {
                tracing::debug!(%location, "no catalog stored yet; starting empty");
                Catalog::new()
            }
            Err(err) => {
                tracing::warn!(location = %self.catalog_store.location(), error = %err, "catalog unavailable; treating as empty");
                Catalog::new()
            }
        }
    }

    pub fn try_load_catalog(&self) -> Result<Catalog, CatalogLoadError> {
        self.catalog_store.load()
    }

    pub fn save_catalog(&self, catalog: &Catalog) -> Result<(), StoreError> {
        self.catalog_store.save(catalog)
    }

    /// Run `command` against `catalog`, persisting and auditing the result.
    ///
    /// On success `catalog` holds the decremented stock and has been saved.
    /// On any error `catalog` is left as it was.
    pub fn purchase(&self, catalog: &mut Catalog, command: &PurchaseItem) -> Result<ItemPurchased, PurchaseError> {
        let event = match catalog.decide(command) {
            Ok(event) => event,
            Err(rejection) => {
                if let Some(record) = PurchaseRecord::rejected(command, &rejection) {
                    self.record(&record);
                }
                tracing::warn!(
                    actor = %command.actor,
                    item = %command.item,
                    quantity = command.quantity,
                    reason = %rejection,
                    "purchase rejected"
                );
                return Err(rejection.into());
            }
        };

        self.commit(catalog, event)
    }

    /// Apply an approved purchase to `catalog`, save it and audit the outcome.
    ///
    /// Exactly one audit line is appended whatever happens.
    pub fn commit(&self, catalog: &mut Catalog, event: ItemPurchased) -> Result<ItemPurchased, PurchaseError> {
        if let Err(err) = catalog.apply(&event) {
            self.record(&PurchaseRecord::not_applied(&event));
            tracing::error!(
                actor = %event.actor,
                department = %event.department,
                item = %event.item,
                quantity = event.quantity,
                error = %err,
                "purchase could not be applied"
            );
            return Err(PurchaseError::Inconsistent(err));
        }

        if let Err(err) = self.save_catalog(catalog) {
            if let Err(revert_err) = catalog.revert(&event) {
                tracing::error!(error = %revert_err, "failed to roll back unsaved purchase");
            }
            self.record(&PurchaseRecord::not_persisted(&event));
            tracing::error!(
                actor = %event.actor,
                department = %event.department,
                item = %event.item,
                quantity = event.quantity,
                error = %err,
                "purchase could not be saved"
            );
            return Err(PurchaseError::Persistence(err));
        }

        self.record(&PurchaseRecord::purchased(&event));
        tracing::info!(
            actor = %event.actor,
            department = %event.department,
            item = %event.item,
            quantity = event.quantity,
            total = %event.total,
            remaining = event.remaining,
            "purchase completed"
        );
        Ok(event)
    }

    /// Load, purchase and save as one serialized step.
    pub fn buy(&self, command: &PurchaseItem) -> Result<ItemPurchased, PurchaseError> {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut catalog = self.load_catalog();
        self.purchase(&mut catalog, command)
    }

    /// Audit appends are best effort: a purchase outcome is never changed by
    /// a failure to log it.
    fn record(&self, record: &PurchaseRecord) {
        let line = record.to_audit_line();
        if let Err(err) = self.audit_log.append(&line) {
            tracing::error!(error = %err, %line, "failed to append audit line");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit_log::InMemoryAuditLog;
    use crate::catalog_store::InMemoryCatalogStore;
    use stockroom_core::{Actor, DepartmentKey, ItemKey, Money};
    use stockroom_inventory::Item;

    const LAPTOPS: &str = r#"{"electronics": {"laptop": {"name": "Laptop", "price": 1000, "count": 5}}}"#;

    fn store(document: &str) -> InventoryStore<InMemoryCatalogStore, InMemoryAuditLog> {
        InventoryStore::new(InMemoryCatalogStore::with_document(document), InMemoryAuditLog::new())
    }

    fn buy(item: &str, quantity: u64) -> PurchaseItem {
        PurchaseItem::new(
            Some(DepartmentKey::new("electronics")),
            ItemKey::new(item),
            quantity,
            Actor::new("Alice"),
        )
    }

    fn laptop_count(catalog: &Catalog) -> u64 {
        catalog
            .item(&"electronics".parse().unwrap(), &"laptop".parse().unwrap())
            .unwrap()
            .count
    }

    #[test]
    fn successful_purchase_persists_and_audits() {
        let store = store(LAPTOPS);
        let mut catalog = store.load_catalog();

        let event = store.purchase(&mut catalog, &buy("laptop", 2)).unwrap();

        assert_eq!(event.total, Money::from_units(2000));
        assert_eq!(laptop_count(&catalog), 3);
        assert_eq!(laptop_count(&store.load_catalog()), 3);

        let lines = store.audit_log().lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Alice bought 2 Laptop for $2000"));
    }

    #[test]
    fn insufficient_stock_is_audited_but_not_saved() {
        let store = store(LAPTOPS);
        let mut catalog = store.load_catalog();

        let err = store.purchase(&mut catalog, &buy("laptop", 6)).unwrap_err();
        assert!(err.is_rejection());
        assert!(matches!(
            err.rejection(),
            Some(PurchaseRejected::InsufficientStock { requested: 6, available: 5, .. })
        ));

        assert_eq!(laptop_count(&catalog), 5);
        assert_eq!(store.catalog_store().document().as_deref(), Some(LAPTOPS));

        let lines = store.audit_log().lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Alice tried to buy 6 Laptop but not enough stock"));
    }

    #[test]
    fn missing_item_is_audited_and_leaves_storage_untouched() {
        let store = store(LAPTOPS);
        let mut catalog = store.load_catalog();

        let err = store.purchase(&mut catalog, &buy("phone", 1)).unwrap_err();
        assert!(matches!(err.rejection(), Some(PurchaseRejected::ItemNotFound { .. })));
        assert_eq!(store.catalog_store().document().as_deref(), Some(LAPTOPS));

        let lines = store.audit_log().lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Alice tried to buy phone but item not found"));
    }

    #[test]
    fn invalid_quantity_is_neither_audited_nor_saved() {
        let store = store(LAPTOPS);
        let mut catalog = store.load_catalog();

        let err = store.purchase(&mut catalog, &buy("laptop", 0)).unwrap_err();
        assert!(matches!(
            err.rejection(),
            Some(PurchaseRejected::Invalid(DomainError::Validation(_)))
        ));
        assert!(store.audit_log().lines().is_empty());
    }

    #[test]
    fn overflowing_total_is_audited_but_not_saved() {
        let document = r#"{"misc": {"moon": {"name": "Moon", "price": 1e30, "count": 1000000000}}}"#;
        let store = store(document);
        let mut catalog = store.load_catalog();
        let command = PurchaseItem::new(None, ItemKey::new("moon"), 1_000_000_000, Actor::new("Alice"));

        let err = store.purchase(&mut catalog, &command).unwrap_err();
        assert!(matches!(err.rejection(), Some(PurchaseRejected::TotalOverflow { .. })));
        assert_eq!(store.catalog_store().document().as_deref(), Some(document));

        let lines = store.audit_log().lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("Alice tried to buy 1000000000 Moon but the total price is too large"));
    }

    #[test]
    fn stale_approval_is_audited_and_reported() {
        let store = store(LAPTOPS);
        let event = store.load_catalog().decide(&buy("laptop", 2)).unwrap();

        let mut emptied = Catalog::new();
        let err = store.commit(&mut emptied, event).unwrap_err();
        assert!(matches!(err, PurchaseError::Inconsistent(_)));
        assert!(!err.is_rejection());
        assert_eq!(store.catalog_store().document().as_deref(), Some(LAPTOPS));

        let lines = store.audit_log().lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("Alice tried to buy 2 Laptop but stock could not be updated"));
    }

    #[test]
    fn failed_save_rolls_back_and_reports_error() {
        let store = store(LAPTOPS);
        store.catalog_store().fail_saves(true);
        let mut catalog = store.load_catalog();

        let err = store.purchase(&mut catalog, &buy("laptop", 2)).unwrap_err();
        assert!(!err.is_rejection());
        assert!(matches!(err, PurchaseError::Persistence(_)));

        assert_eq!(laptop_count(&catalog), 5);
        assert_eq!(store.catalog_store().document().as_deref(), Some(LAPTOPS));

        let lines = store.audit_log().lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("could not be saved"));
    }

    #[test]
    fn missing_or_corrupt_catalog_loads_empty() {
        let missing = InventoryStore::new(InMemoryCatalogStore::new(), InMemoryAuditLog::new());
        assert!(missing.load_catalog().is_empty());
        assert!(matches!(missing.try_load_catalog(), Err(CatalogLoadError::Missing { .. })));

        let corrupt = store("[1, 2");
        assert!(corrupt.load_catalog().is_empty());
        assert!(matches!(corrupt.try_load_catalog(), Err(CatalogLoadError::Corrupt { .. })));
    }

    #[test]
    fn buy_against_corrupt_catalog_does_not_overwrite_it() {
        let store = store("[1, 2");
        let err = store.buy(&buy("laptop", 1)).unwrap_err();
        assert!(matches!(err.rejection(), Some(PurchaseRejected::ItemNotFound { .. })));
        assert_eq!(store.catalog_store().document().as_deref(), Some("[1, 2"));
    }

    #[test]
    fn save_then_load_preserves_content() {
        let store = store(LAPTOPS);
        let before = store.load_catalog();
        store.save_catalog(&before).unwrap();
        assert_eq!(store.load_catalog(), before);

        let mut grown = before.clone();
        grown.insert_item(
            "grocery".parse().unwrap(),
            "apple".parse().unwrap(),
            Item::new("Apple", Money::from_cents(50), 10),
        );
        store.save_catalog(&grown).unwrap();
        assert_eq!(store.load_catalog(), grown);
    }
}
