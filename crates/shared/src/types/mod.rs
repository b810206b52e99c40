//! Common types used across the application.

pub mod code;
pub mod dates;
pub mod id;
pub mod money;
pub mod pagination;

#[cfg(test)]
mod code_props;
#[cfg(test)]
mod money_props;

pub use code::{CanonicalCode, CodeError, CodeKind, normalize_code};
pub use id::{RecordId, new_key};
pub use money::{Cents, MoneyError, MoneyInput};
pub use pagination::{PageRequest, PageResponse};
