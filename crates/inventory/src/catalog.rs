use std::collections::BTreeMap;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as JsonValue};

use stockroom_core::{DepartmentKey, DomainError, ItemKey, Money, PATH_SEPARATOR};

/// Unit price as written in the catalog document.
///
/// The stored number is written back untouched (`19.999` stays `19.999`,
/// large integers stay exact); [`Price::amount`] is its exact value used for
/// totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Number", into = "Number")]
pub struct Price {
    stored: Number,
    amount: Money,
}

impl Price {
    pub fn amount(&self) -> Money {
        self.amount
    }
}

impl TryFrom<Number> for Price {
    type Error = DomainError;

    fn try_from(stored: Number) -> Result<Self, Self::Error> {
        let amount = if let Some(units) = stored.as_u64() {
            Money::from_units(units)
        } else if stored.is_i64() {
            return Err(DomainError::invalid_amount(format!("price {stored} is negative")));
        } else {
            Money::from_f64(stored.as_f64().unwrap_or(f64::NAN))?
        };
        Ok(Self { stored, amount })
    }
}

impl From<Price> for Number {
    fn from(price: Price) -> Self {
        price.stored
    }
}

impl From<Money> for Price {
    fn from(amount: Money) -> Self {
        let stored = match amount.as_u64() {
            Some(units) => Number::from(units),
            None => Number::from_f64(amount.as_f64()).unwrap_or_else(|| Number::from(0u64)),
        };
        Self { stored, amount }
    }
}

/// Shown exactly as stored.
impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.stored)
    }
}

/// Stock counts are whole and non-negative; `5.0` is accepted as `5`.
fn deserialize_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    struct CountVisitor;

    impl Visitor<'_> for CountVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("a non-negative whole number")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::custom(format!("count {v} is negative")))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u64, E> {
            // 2^64 is the first float past u64::MAX
            if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v < 18_446_744_073_709_551_616.0 {
                Ok(v as u64)
            } else {
                Err(E::custom(format!("count {v} is not a non-negative whole number")))
            }
        }
    }

    deserializer.deserialize_any(CountVisitor)
}

/// One purchasable product.
///
/// Fields the domain does not know about are kept in `extra` so that a
/// load/save cycle never drops data curated outside this tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub price: Price,
    #[serde(deserialize_with = "deserialize_count")]
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

impl Item {
    pub fn new(name: impl Into<String>, price: impl Into<Price>, count: u64) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            count,
            description: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Items of one department, keyed by item key.
pub type Department = BTreeMap<ItemKey, Item>;

/// The full department → item → stock document.
///
/// Iteration follows key order; ordering carries no meaning beyond display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    departments: BTreeMap<DepartmentKey, Department>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    /// Total number of items across all departments.
    pub fn item_count(&self) -> usize {
        self.departments.values().map(BTreeMap::len).sum()
    }

    pub fn departments(&self) -> impl Iterator<Item = (&DepartmentKey, &Department)> {
        self.departments.iter()
    }

    pub fn department(&self, key: &DepartmentKey) -> Option<&Department> {
        self.departments.get(key)
    }

    pub fn item(&self, department: &DepartmentKey, item: &ItemKey) -> Option<&Item> {
        self.departments.get(department)?.get(item)
    }

    pub(crate) fn item_mut(&mut self, department: &DepartmentKey, item: &ItemKey) -> Option<&mut Item> {
        self.departments.get_mut(department)?.get_mut(item)
    }

    /// First department (in key order) holding `item`.
    pub fn find_item(&self, item: &ItemKey) -> Option<(&DepartmentKey, &ItemKey, &Item)> {
        self.departments
            .iter()
            .find_map(|(dept, items)| items.get_key_value(item).map(|(key, found)| (dept, key, found)))
    }

    /// Resolve a user-typed target: either `department/item` or a bare item key.
    ///
    /// Keys may contain the separator themselves, so every split point is
    /// tried (leftmost first) before falling back to a bare key search.
    pub fn locate(&self, target: &str) -> Option<(&DepartmentKey, &ItemKey, &Item)> {
        target
            .match_indices(PATH_SEPARATOR)
            .find_map(|(at, sep)| {
                let (dept, item) = (&target[..at], &target[at + sep.len()..]);
                let (dept, items) = self.departments.get_key_value(dept)?;
                items.get_key_value(item).map(|(key, found)| (dept, key, found))
            })
            .or_else(|| self.find_item(&ItemKey::new(target)))
    }

    /// Insert or replace an item, creating the department when needed.
    pub fn insert_item(&mut self, department: DepartmentKey, key: ItemKey, item: Item) -> Option<Item> {
        self.departments.entry(department).or_default().insert(key, item)
    }
}
