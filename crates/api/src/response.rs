//! Renders action results as HTTP responses.
//!
//! The body is always the `{ok, data}` / `{ok, error}` envelope. The status
//! follows the failure kind, or 200/201 on success.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};
use sras_core::action::{ActionError, ActionResult};
use sras_core::validation::Contract;
use sras_shared::AppError;
use sras_shared::types::PageRequest;
use tracing::error;

/// An action result paired with its success status.
#[derive(Debug)]
pub struct ActionResponse<T> {
    result: ActionResult<T>,
    success: StatusCode,
}

impl<T> ActionResponse<T> {
    /// A result that answers 200 on success.
    #[must_use]
    pub const fn ok(result: ActionResult<T>) -> Self {
        Self {
            result,
            success: StatusCode::OK,
        }
    }

    /// A result that answers 201 on success.
    #[must_use]
    pub const fn created(result: ActionResult<T>) -> Self {
        Self {
            result,
            success: StatusCode::CREATED,
        }
    }

    /// The status this response will carry.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.result.error() {
            None => self.success,
            Some(err) => StatusCode::from_u16(err.kind().status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl<T: Serialize> IntoResponse for ActionResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self.result)).into_response()
    }
}

/// Folds a read query into the envelope.
pub fn query<T, E>(result: Result<T, E>) -> ActionResponse<T>
where
    E: Into<AppError>,
{
    ActionResponse::ok(result.map_err(failure).into())
}

/// Folds a single-record read into the envelope; `None` becomes not found.
pub fn query_one<T, E>(result: Result<Option<T>, E>, missing: &str) -> ActionResponse<T>
where
    E: Into<AppError>,
{
    query(result.map_err(Into::into).and_then(|found| {
        found.ok_or_else(|| AppError::NotFound(missing.to_string()))
    }))
}

/// Converts a request problem found outside a contract, such as a bad query
/// parameter, into a failure envelope.
pub fn rejected<T>(err: AppError) -> ActionResponse<T> {
    ActionResponse::ok(ActionResult::Failure(failure(err)))
}

/// Validates `page` and `limit` query parameters; a bad value becomes a
/// failure envelope.
pub fn page_request<T>(
    page: Option<&str>,
    limit: Option<&str>,
) -> Result<PageRequest, ActionResponse<T>> {
    let mut params = Map::new();
    for (name, raw) in [("page", page), ("limit", limit)] {
        if let Some(raw) = raw.filter(|raw| !raw.is_empty()) {
            let value = raw.parse::<u64>().map_or_else(|_| Value::from(raw), Value::from);
            params.insert(name.to_string(), value);
        }
    }
    PageRequest::validate(&Value::Object(params))
        .map_err(|errors| ActionResponse::ok(ActionResult::Failure(errors.into())))
}

fn failure(err: impl Into<AppError>) -> ActionError {
    let err = err.into();
    if err.is_unexpected() {
        error!(error = %err, code = err.error_code(), "Query failed");
    }
    err.into()
}
