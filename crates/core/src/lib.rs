//! `stockroom-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod key;
pub mod money;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use key::{Actor, DepartmentKey, ItemKey, PATH_SEPARATOR};
pub use money::Money;
pub use value_object::ValueObject;
