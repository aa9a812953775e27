//! Strongly-typed catalog keys and the purchasing actor.

use core::convert::Infallible;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Key of a department in the catalog (e.g. `"electronics"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentKey(String);

/// Key of an item within a department (e.g. `"laptop"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

/// Separator used by compound `department/item` paths.
///
/// Keys read from a catalog may themselves contain it (`"home/garden"`), so a
/// path is resolved against the catalog rather than split blindly.
pub const PATH_SEPARATOR: char = '/';

macro_rules! impl_string_key {
    ($t:ty) => {
        impl $t {
            /// Any string is a valid key, as long as the catalog uses it.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl core::borrow::Borrow<str> for $t {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::new(s))
            }
        }
    };
}

impl_string_key!(DepartmentKey);
impl_string_key!(ItemKey);

/// Free-text name of whoever attempts a purchase.
///
/// Blank names collapse to [`Actor::UNKNOWN`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Actor(String);

impl Actor {
    pub const UNKNOWN: &'static str = "Unknown";

    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Self::unknown()
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    /// Build from an optional name, as supplied by a form field.
    pub fn from_optional(name: Option<&str>) -> Self {
        name.map(Self::new).unwrap_or_else(Self::unknown)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Actor {}

impl Default for Actor {
    fn default() -> Self {
        Self::unknown()
    }
}

impl core::fmt::Display for Actor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Actor {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Actor {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Actor> for String {
    fn from(value: Actor) -> Self {
        value.0
    }
}
