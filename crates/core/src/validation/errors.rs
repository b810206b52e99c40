//! Collected field violations.

use std::collections::BTreeMap;
use std::fmt;

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dot-joined path of the offending field; empty for the whole input.
    pub path: String,
    /// Human-readable message.
    pub message: String,
}

/// Every violation found while validating one input, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Creates a collection holding a single violation.
    #[must_use]
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(path, message);
        errors
    }

    /// Records a violation.
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Records the error of `result` under `path`, returning the value on success.
    pub fn check<T>(&mut self, path: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.push(path, message);
                None
            }
        }
    }

    /// Merges violations of a nested input, prefixing their paths.
    pub fn absorb(&mut self, prefix: &str, other: Self) {
        for error in other.errors {
            let path = match (prefix.is_empty(), error.path.is_empty()) {
                (true, _) => error.path,
                (false, true) => prefix.to_string(),
                (false, false) => format!("{prefix}.{}", error.path),
            };
            self.errors.push(FieldError {
                path,
                message: error.message,
            });
        }
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over the violations in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// The message of the first violation.
    #[must_use]
    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    /// Field-scoped messages keyed by path.
    ///
    /// Whole-input violations (empty path) are left out, and the first
    /// message recorded for a path wins.
    #[must_use]
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for error in self.errors.iter().filter(|e| !e.path.is_empty()) {
            map.entry(error.path.clone())
                .or_insert_with(|| error.message.clone());
        }
        map
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.first_message().unwrap_or("Validation failed"))
    }
}

impl std::error::Error for ValidationErrors {}
