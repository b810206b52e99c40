//! Canonical business codes.
//!
//! Account, fee item and grade level codes are natural keys. They are validated
//! against a character class and upper-cased once, when they enter the system,
//! so that storage and comparison always see the canonical form.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The family a code belongs to, which fixes its length and character rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeKind {
    /// Chart of accounts code, up to 50 characters.
    Account,
    /// Fee item code, up to 50 characters.
    FeeItem,
    /// Grade level code, up to 20 characters.
    GradeLevel,
    /// General-purpose code: 3 to 20 characters, hyphens allowed.
    Generic,
}

impl CodeKind {
    /// Minimum length in characters.
    #[must_use]
    pub const fn min_len(self) -> usize {
        match self {
            Self::Account | Self::FeeItem | Self::GradeLevel => 1,
            Self::Generic => 3,
        }
    }

    /// Maximum length in characters.
    #[must_use]
    pub const fn max_len(self) -> usize {
        match self {
            Self::Account | Self::FeeItem => 50,
            Self::GradeLevel | Self::Generic => 20,
        }
    }

    /// Whether `-` is part of the character class.
    #[must_use]
    pub const fn allows_hyphen(self) -> bool {
        matches!(self, Self::Generic)
    }

    fn accepts(self, c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || (c == '-' && self.allows_hyphen())
    }

    fn format_message(self) -> &'static str {
        if self.allows_hyphen() {
            "Code can only contain letters, numbers, hyphens, and underscores"
        } else {
            "Code can only contain letters, numbers, and underscores"
        }
    }
}

/// Errors raised while normalizing a code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    /// The code is empty.
    #[error("Code cannot be empty")]
    Empty,

    /// The code is shorter than its kind allows.
    #[error("Code must be at least {min} characters")]
    TooShort {
        /// Minimum length.
        min: usize,
    },

    /// The code is longer than its kind allows.
    #[error("Code must be at most {max} characters")]
    TooLong {
        /// Maximum length.
        max: usize,
    },

    /// The code contains characters outside its class.
    #[error("{message}")]
    InvalidCodeFormat {
        /// Human-readable description of the allowed characters.
        message: &'static str,
        /// The rejected characters, in order of first appearance.
        offending: String,
    },
}

impl CodeError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Empty | Self::TooShort { .. } | Self::TooLong { .. } => "INVALID_CODE_LENGTH",
            Self::InvalidCodeFormat { .. } => "INVALID_CODE_FORMAT",
        }
    }
}

/// An upper-case code matching `^[A-Z0-9_]+$` (or `^[A-Z0-9_-]+$` for generic codes).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalCode(String);

impl CanonicalCode {
    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the code and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validates `raw` against the rules of `kind` and returns its canonical form.
///
/// Character checks run before upper-casing, so `"tuition_fee"` becomes
/// `"TUITION_FEE"` while `"tuition fee"` is rejected. Normalizing an already
/// canonical code returns it unchanged.
pub fn normalize_code(raw: &str, kind: CodeKind) -> Result<CanonicalCode, CodeError> {
    let len = raw.chars().count();
    if len == 0 {
        return Err(CodeError::Empty);
    }
    if len < kind.min_len() {
        return Err(CodeError::TooShort {
            min: kind.min_len(),
        });
    }
    if len > kind.max_len() {
        return Err(CodeError::TooLong {
            max: kind.max_len(),
        });
    }

    let mut offending = String::new();
    for c in raw.chars().filter(|c| !kind.accepts(*c)) {
        if !offending.contains(c) {
            offending.push(c);
        }
    }
    if !offending.is_empty() {
        return Err(CodeError::InvalidCodeFormat {
            message: kind.format_message(),
            offending,
        });
    }

    Ok(CanonicalCode(raw.to_ascii_uppercase()))
}
