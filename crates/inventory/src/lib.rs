//! Inventory domain module.
//!
//! This crate contains business rules for the stock catalog and purchases,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod audit;
pub mod catalog;
pub mod display;
pub mod purchase;

pub use audit::{AUDIT_TIMESTAMP_FORMAT, PurchaseOutcome, PurchaseRecord, format_audit_line};
pub use catalog::{Catalog, Department, Item, Price};
pub use display::{ItemPath, ListingEntry, listing, render_catalog, render_department, render_listing};
pub use purchase::{ItemPurchased, PurchaseItem, PurchaseRejected};
