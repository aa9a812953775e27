//! Formatting helpers for presenting a catalog.

use stockroom_core::{DepartmentKey, ItemKey, PATH_SEPARATOR};

use crate::catalog::{Catalog, Department, Item};

/// Compound `department/item` address of an item.
///
/// Displayed form is what [`Catalog::locate`] accepts back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemPath {
    pub department: DepartmentKey,
    pub item: ItemKey,
}

impl core::fmt::Display for ItemPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}{}", self.department, PATH_SEPARATOR, self.item)
    }
}

/// One selectable row of a flattened catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingEntry<'a> {
    pub path: ItemPath,
    pub item: &'a Item,
}

impl ListingEntry<'_> {
    pub fn label(&self) -> String {
        format!(
            "{} — {} (${}) — {} in stock",
            self.path, self.item.name, self.item.price, self.item.count
        )
    }
}

/// Every item of the catalog as a flat list, department by department.
pub fn listing(catalog: &Catalog) -> Vec<ListingEntry<'_>> {
    catalog
        .departments()
        .flat_map(|(dept, items)| {
            items.iter().map(move |(key, item)| ListingEntry {
                path: ItemPath {
                    department: dept.clone(),
                    item: key.clone(),
                },
                item,
            })
        })
        .collect()
}

/// One label per line, ready to pick a purchase target from.
pub fn render_listing(catalog: &Catalog) -> String {
    listing(catalog)
        .iter()
        .map(|entry| format!("{}\n", entry.label()))
        .collect()
}

pub fn render_department(key: &DepartmentKey, items: &Department) -> String {
    let mut out = format!("{} DEPARTMENT:\n{}\n", key.as_str().to_uppercase(), "-".repeat(25));
    for item in items.values() {
        out.push_str(&format!("• {}\n", item.name));
        if let Some(description) = &item.description {
            out.push_str(&format!("  {description}\n"));
        }
        out.push_str(&format!("  Price: ${}\n", item.price));
        out.push_str(&format!("  Stock: {} units\n\n", item.count));
    }
    out
}

pub fn render_catalog(catalog: &Catalog) -> String {
    catalog
        .departments()
        .map(|(key, items)| render_department(key, items))
        .collect::<Vec<_>>()
        .join("\n")
}
