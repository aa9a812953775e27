//! Human-readable audit records for purchase attempts.

use core::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

use stockroom_core::{Actor, ItemKey, Money};

use crate::purchase::{ItemPurchased, PurchaseItem, PurchaseRejected};

/// Timestamp layout of every audit line.
pub const AUDIT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `"<timestamp> - <actor> <outcome_description>"`.
///
/// Line breaks inside the actor or description are flattened to spaces so one
/// attempt always occupies exactly one line.
pub fn format_audit_line<Tz>(timestamp: &DateTime<Tz>, actor: &Actor, outcome_description: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{} - {} {}",
        timestamp.format(AUDIT_TIMESTAMP_FORMAT),
        actor,
        outcome_description
    )
    .replace(['\r', '\n'], " ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased { item_name: String, total: Money },
    InsufficientStock { item_name: String },
    ItemNotFound { item: ItemKey },
    /// `price × quantity` does not fit in a [`Money`].
    TotalTooLarge { item_name: String },
    /// Approved but the decrement could not be applied to the catalog.
    NotApplied { item_name: String },
    /// Approved but the catalog could not be written; stock was rolled back.
    NotPersisted { item_name: String },
}

/// One purchase attempt, as it appears in the audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRecord {
    pub occurred_at: DateTime<Utc>,
    pub actor: Actor,
    pub quantity: u64,
    pub outcome: PurchaseOutcome,
}

impl PurchaseRecord {
    pub fn purchased(event: &ItemPurchased) -> Self {
        Self {
            occurred_at: event.occurred_at,
            actor: event.actor.clone(),
            quantity: event.quantity,
            outcome: PurchaseOutcome::Purchased {
                item_name: event.item_name.clone(),
                total: event.total,
            },
        }
    }

    pub fn not_applied(event: &ItemPurchased) -> Self {
        Self {
            occurred_at: event.occurred_at,
            actor: event.actor.clone(),
            quantity: event.quantity,
            outcome: PurchaseOutcome::NotApplied {
                item_name: event.item_name.clone(),
            },
        }
    }

    pub fn not_persisted(event: &ItemPurchased) -> Self {
        Self {
            occurred_at: event.occurred_at,
            actor: event.actor.clone(),
            quantity: event.quantity,
            outcome: PurchaseOutcome::NotPersisted {
                item_name: event.item_name.clone(),
            },
        }
    }

    /// Record for a rejected command. Invalid commands are not purchase
    /// attempts and yield `None`.
    pub fn rejected(command: &PurchaseItem, rejection: &PurchaseRejected) -> Option<Self> {
        let outcome = match rejection {
            PurchaseRejected::Invalid(_) => return None,
            PurchaseRejected::ItemNotFound { item, .. } => PurchaseOutcome::ItemNotFound { item: item.clone() },
            PurchaseRejected::InsufficientStock { item_name, .. } => PurchaseOutcome::InsufficientStock {
                item_name: item_name.clone(),
            },
            PurchaseRejected::TotalOverflow { item_name, .. } => PurchaseOutcome::TotalTooLarge {
                item_name: item_name.clone(),
            },
        };
        Some(Self {
            occurred_at: command.occurred_at,
            actor: command.actor.clone(),
            quantity: command.quantity,
            outcome,
        })
    }

    pub fn description(&self) -> String {
        let quantity = self.quantity;
        match &self.outcome {
            PurchaseOutcome::Purchased { item_name, total } => {
                format!("bought {quantity} {item_name} for ${total}")
            }
            PurchaseOutcome::InsufficientStock { item_name } => {
                format!("tried to buy {quantity} {item_name} but not enough stock")
            }
            PurchaseOutcome::ItemNotFound { item } => {
                format!("tried to buy {item} but item not found")
            }
            PurchaseOutcome::TotalTooLarge { item_name } => {
                format!("tried to buy {quantity} {item_name} but the total price is too large")
            }
            PurchaseOutcome::NotApplied { item_name } => {
                format!("tried to buy {quantity} {item_name} but stock could not be updated")
            }
            PurchaseOutcome::NotPersisted { item_name } => {
                format!("tried to buy {quantity} {item_name} but the purchase could not be saved")
            }
        }
    }

    /// Audit line with the timestamp rendered in local time.
    pub fn to_audit_line(&self) -> String {
        format_audit_line(&self.occurred_at.with_timezone(&Local), &self.actor, &self.description())
    }
}
