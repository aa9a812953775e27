//! Purchase decision logic.
//!
//! Follows a decide/apply split: [`Catalog::decide`] inspects the catalog and
//! either approves a purchase (returning the [`ItemPurchased`] fact) or rejects
//! it; [`Catalog::apply`] is the only place stock is decremented.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockroom_core::{Actor, DepartmentKey, DomainError, DomainResult, ItemKey, Money};

use crate::catalog::Catalog;

/// Command: buy `quantity` units of an item.
///
/// When `department` is `None`, `item` is resolved with [`Catalog::locate`]:
/// it may be a `department/item` path or a bare key searched across all
/// departments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseItem {
    pub department: Option<DepartmentKey>,
    pub item: ItemKey,
    pub quantity: u64,
    pub actor: Actor,
    pub occurred_at: DateTime<Utc>,
}

impl PurchaseItem {
    /// Command stamped with the current time.
    pub fn new(department: Option<DepartmentKey>, item: ItemKey, quantity: u64, actor: Actor) -> Self {
        Self {
            department,
            item,
            quantity,
            actor,
            occurred_at: Utc::now(),
        }
    }
}

/// Fact: a purchase was approved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPurchased {
    pub department: DepartmentKey,
    pub item: ItemKey,
    pub item_name: String,
    pub quantity: u64,
    pub unit_price: Money,
    pub total: Money,
    /// Stock left once the purchase is applied.
    pub remaining: u64,
    pub actor: Actor,
    pub occurred_at: DateTime<Utc>,
}

/// Why a purchase was not approved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseRejected {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("item not found: {}", describe_target(.department.as_ref(), .item))]
    ItemNotFound {
        department: Option<DepartmentKey>,
        item: ItemKey,
    },

    #[error("not enough stock for {item_name}: requested {requested}, available {available}")]
    InsufficientStock {
        department: DepartmentKey,
        item: ItemKey,
        item_name: String,
        requested: u64,
        available: u64,
    },

    #[error("total price of {requested} {item_name} is too large")]
    TotalOverflow {
        department: DepartmentKey,
        item: ItemKey,
        item_name: String,
        requested: u64,
    },
}

fn describe_target(department: Option<&DepartmentKey>, item: &ItemKey) -> String {
    match department {
        Some(dept) => format!("{dept}/{item}"),
        None => item.to_string(),
    }
}

impl Catalog {
    /// Decide whether `command` can be fulfilled. Does not mutate the catalog.
    pub fn decide(&self, command: &PurchaseItem) -> Result<ItemPurchased, PurchaseRejected> {
        if command.quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1").into());
        }

        let resolved = match &command.department {
            Some(dept) => self.item(dept, &command.item).map(|item| (dept, &command.item, item)),
            None => self.locate(command.item.as_str()),
        };
        let Some((department, key, item)) = resolved else {
            return Err(PurchaseRejected::ItemNotFound {
                department: command.department.clone(),
                item: command.item.clone(),
            });
        };

        if item.count < command.quantity {
            return Err(PurchaseRejected::InsufficientStock {
                department: department.clone(),
                item: key.clone(),
                item_name: item.name.clone(),
                requested: command.quantity,
                available: item.count,
            });
        }

        let unit_price = item.price.amount();
        let Some(total) = unit_price.checked_mul(command.quantity) else {
            return Err(PurchaseRejected::TotalOverflow {
                department: department.clone(),
                item: key.clone(),
                item_name: item.name.clone(),
                requested: command.quantity,
            });
        };

        Ok(ItemPurchased {
            department: department.clone(),
            item: key.clone(),
            item_name: item.name.clone(),
            quantity: command.quantity,
            unit_price,
            total,
            remaining: item.count - command.quantity,
            actor: command.actor.clone(),
            occurred_at: command.occurred_at,
        })
    }

    /// Decrement stock for an approved purchase.
    pub fn apply(&mut self, event: &ItemPurchased) -> DomainResult<()> {
        let item = self
            .item_mut(&event.department, &event.item)
            .ok_or_else(|| DomainError::invariant("purchased item no longer in catalog"))?;
        item.count = item
            .count
            .checked_sub(event.quantity)
            .ok_or_else(|| DomainError::invariant("stock cannot go negative"))?;
        Ok(())
    }

    /// Undo [`Catalog::apply`] (used when the purchase could not be persisted).
    pub fn revert(&mut self, event: &ItemPurchased) -> DomainResult<()> {
        let item = self
            .item_mut(&event.department, &event.item)
            .ok_or_else(|| DomainError::invariant("purchased item no longer in catalog"))?;
        item.count = item
            .count
            .checked_add(event.quantity)
            .ok_or_else(|| DomainError::invariant("stock overflows"))?;
        Ok(())
    }
}
