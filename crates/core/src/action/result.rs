//! The success/failure envelope returned by every validated action.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use sras_shared::{AppError, GENERIC_ERROR_MESSAGE};

use crate::validation::ValidationErrors;

/// Why an action failed; decides the HTTP status, never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The input broke its contract.
    Validation,
    /// A business rule rejected the request.
    BusinessRule,
    /// A referenced record does not exist.
    NotFound,
    /// The request collides with existing data.
    Conflict,
    /// Something the caller did not cause.
    Unexpected,
}

impl FailureKind {
    /// HTTP status code for this kind of failure.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::BusinessRule => 422,
            Self::Unexpected => 500,
        }
    }
}

/// The error half of an [`ActionResult`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionError {
    /// Message suitable for a general error banner.
    pub message: String,
    /// Messages keyed by dotted field path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<BTreeMap<String, String>>,
    #[serde(skip)]
    kind: FailureKind,
}

impl ActionError {
    /// A business-rule failure with a plain message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: None,
            kind: FailureKind::BusinessRule,
        }
    }

    /// A failure of the given kind.
    #[must_use]
    pub fn with_kind(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: None,
            kind,
        }
    }

    /// The generic failure shown for anything unexpected.
    #[must_use]
    pub fn unexpected() -> Self {
        Self::with_kind(FailureKind::Unexpected, GENERIC_ERROR_MESSAGE)
    }

    /// What kind of failure this is.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }
}

impl From<ValidationErrors> for ActionError {
    fn from(errors: ValidationErrors) -> Self {
        Self {
            message: errors.to_string(),
            field_errors: Some(errors.field_errors()),
            kind: FailureKind::Validation,
        }
    }
}

impl From<AppError> for ActionError {
    fn from(err: AppError) -> Self {
        let kind = match &err {
            AppError::Validation(_) | AppError::Money(_) | AppError::Code(_) => {
                FailureKind::Validation
            }
            AppError::ReferentialIntegrity(_) | AppError::BusinessRule(_) => {
                FailureKind::BusinessRule
            }
            AppError::NotFound(_) => FailureKind::NotFound,
            AppError::Conflict(_) => FailureKind::Conflict,
            AppError::Database(_) | AppError::Internal(_) => FailureKind::Unexpected,
        };
        Self::with_kind(kind, err.public_message())
    }
}

/// Outcome of one action invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult<T> {
    /// The handler ran and produced `T`.
    Success(T),
    /// Validation or the handler failed.
    Failure(ActionError),
}

impl<T> ActionResult<T> {
    /// Wraps a successful value.
    pub const fn success(data: T) -> Self {
        Self::Success(data)
    }

    /// A business failure carrying only a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(ActionError::new(message))
    }

    /// A validation failure carrying field messages.
    pub fn failure_with_fields(
        message: impl Into<String>,
        field_errors: BTreeMap<String, String>,
    ) -> Self {
        Self::Failure(ActionError {
            message: message.into(),
            field_errors: Some(field_errors),
            kind: FailureKind::Validation,
        })
    }

    /// Returns true for `Success`.
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The success value, if any.
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// The failure, if any.
    pub const fn error(&self) -> Option<&ActionError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Converts into a standard `Result`.
    pub fn into_result(self) -> Result<T, ActionError> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(error) => Err(error),
        }
    }

    /// Transforms the success value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ActionResult<U> {
        match self {
            Self::Success(data) => ActionResult::Success(f(data)),
            Self::Failure(error) => ActionResult::Failure(error),
        }
    }
}

impl<T> From<Result<T, ActionError>> for ActionResult<T> {
    fn from(result: Result<T, ActionError>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(error) => Self::Failure(error),
        }
    }
}

/// `{"ok": true, "data": ...}` or `{"ok": false, "error": {...}}`.
impl<T: Serialize> Serialize for ActionResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            Self::Success(data) => {
                map.serialize_entry("ok", &true)?;
                map.serialize_entry("data", data)?;
            }
            Self::Failure(error) => {
                map.serialize_entry("ok", &false)?;
                map.serialize_entry("error", error)?;
            }
        }
        map.end()
    }
}
