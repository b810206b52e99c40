//! Field validators and input contracts.
//!
//! Untrusted input arrives as a JSON value. A [`Contract`] turns it into a
//! typed, normalized struct, or reports every violated field at once.

mod errors;
pub mod fields;

#[cfg(test)]
mod fields_props;

pub use errors::{FieldError, ValidationErrors};
pub use fields::{DateInput, SortOrder};

use serde_json::{Map, Value};
use sras_shared::types::PageRequest;
use sras_shared::types::pagination::{MAX_LIMIT, default_limit};

/// A typed input that can be validated from an untrusted value.
pub trait Contract: Sized {
    /// Validates and normalizes `input`.
    ///
    /// # Errors
    ///
    /// Returns every violation found, in field order.
    fn validate(input: &Value) -> Result<Self, ValidationErrors>;
}

/// Read access to the members of an input object.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    object: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// Requires `input` to be an object.
    ///
    /// # Errors
    ///
    /// Returns a whole-input violation for any other JSON type.
    pub fn of(input: &'a Value) -> Result<Self, ValidationErrors> {
        input
            .as_object()
            .map(|object| Self { object })
            .ok_or_else(|| ValidationErrors::single("", "Expected an object"))
    }

    /// The member named `name`, if present (null included).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.object.get(name)
    }

    /// The member named `name`, treating null as absent.
    #[must_use]
    pub fn present(&self, name: &str) -> Option<&'a Value> {
        self.object.get(name).filter(|value| !value.is_null())
    }
}

impl Contract for PageRequest {
    fn validate(input: &Value) -> Result<Self, ValidationErrors> {
        let fields = Fields::of(input)?;
        let mut errors = ValidationErrors::new();

        let page = errors.check(
            "page",
            fields.present("page").map_or(Ok(1), |v| {
                fields::positive_integer(v, "Page must be a positive integer")
                    .and_then(|page| u32::try_from(page).map_err(|_| "Page is too large".to_string()))
            }),
        );
        let limit = errors.check(
            "limit",
            fields
                .present("limit")
                .map_or(Ok(u64::from(default_limit())), |v| {
                    fields::positive_integer(v, "Limit must be a positive integer")
                })
                .and_then(|limit| match u32::try_from(limit) {
                    Ok(limit) if limit <= MAX_LIMIT => Ok(limit),
                    _ => Err(format!("Limit must be at most {MAX_LIMIT}")),
                }),
        );

        let (Some(page), Some(limit)) = (page, limit) else {
            return Err(errors);
        };
        Ok(Self { page, limit })
    }
}
