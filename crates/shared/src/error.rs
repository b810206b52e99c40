//! Application-wide error types.

use thiserror::Error;

use crate::types::{CodeError, MoneyError};

/// Message shown in place of infrastructure failures.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Business variants carry a plain sentence meant for end users; the
/// infrastructure variants (`Database`, `Internal`) carry details that are
/// logged but never shown.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed a field contract.
    #[error("{0}")]
    Validation(String),

    /// Money normalization or arithmetic failed.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Code normalization failed.
    #[error(transparent)]
    Code(#[from] CodeError),

    /// A referenced entity does not exist.
    #[error("{0}")]
    ReferentialIntegrity(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Conflict (e.g., duplicate entry).
    #[error("{0}")]
    Conflict(String),

    /// Business rule violation.
    #[error("{0}")]
    BusinessRule(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Money(_) | Self::Code(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::ReferentialIntegrity(_) | Self::BusinessRule(_) => 422,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Money(e) => e.error_code(),
            Self::Code(e) => e.error_code(),
            Self::ReferentialIntegrity(_) => "REFERENTIAL_INTEGRITY_VIOLATION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true for failures the caller did not cause.
    #[must_use]
    pub const fn is_unexpected(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Internal(_))
    }

    /// Returns the message that may be shown to end users.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.is_unexpected() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(
            AppError::Money(MoneyError::InvalidMoneyFormat(String::new())).status_code(),
            400
        );
        assert_eq!(AppError::Code(CodeError::Empty).status_code(), 400);
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(AppError::Conflict(String::new()).status_code(), 409);
        assert_eq!(
            AppError::ReferentialIntegrity(String::new()).status_code(),
            422
        );
        assert_eq!(AppError::BusinessRule(String::new()).status_code(), 422);
        assert_eq!(AppError::Database(String::new()).status_code(), 500);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::Money(MoneyError::UnsafeArithmeticResult {
                operation: "Addition"
            })
            .error_code(),
            "UNSAFE_ARITHMETIC_RESULT"
        );
        assert_eq!(
            AppError::ReferentialIntegrity(String::new()).error_code(),
            "REFERENTIAL_INTEGRITY_VIOLATION"
        );
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(AppError::Conflict(String::new()).error_code(), "CONFLICT");
        assert_eq!(
            AppError::Database(String::new()).error_code(),
            "DATABASE_ERROR"
        );
    }

    #[test]
    fn test_business_messages_are_public() {
        let err = AppError::ReferentialIntegrity(
            "Account with code \"TUITION_REVENUE\" does not exist".into(),
        );
        assert_eq!(
            err.public_message(),
            "Account with code \"TUITION_REVENUE\" does not exist"
        );
        assert_eq!(
            AppError::from(CodeError::Empty).public_message(),
            "Code cannot be empty"
        );
    }

    #[test]
    fn test_infrastructure_messages_are_hidden() {
        let err = AppError::Database("connection refused at 10.0.0.5:5432".into());
        assert!(err.is_unexpected());
        assert_eq!(err.public_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(
            err.to_string(),
            "Database error: connection refused at 10.0.0.5:5432"
        );
    }
}
