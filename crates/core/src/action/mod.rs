//! Validated action pipeline.
//!
//! [`wrap_action`] pairs an input [`Contract`](crate::validation::Contract)
//! with a business handler. Calling the result validates untrusted input,
//! runs the handler only if validation passed, and folds every outcome into an
//! [`ActionResult`]:
//!
//! - contract violations become a failure with `fieldErrors`;
//! - handler errors become a failure with the error's public message;
//! - infrastructure errors are logged and replaced by a generic message.
//!
//! Panics are not caught: release builds abort on panic, and a handler that
//! panics has a bug rather than a failure to report.

mod result;

pub use result::{ActionError, ActionResult, FailureKind};

use std::future::Future;
use std::marker::PhantomData;

use serde_json::Value;
use sras_shared::AppError;

use crate::validation::Contract;

/// A handler bound to the contract of its input.
pub struct Action<I, H> {
    handler: H,
    _input: PhantomData<fn() -> I>,
}

/// Wraps `handler` so that it only ever sees input that passed `I`'s contract.
///
/// ```
/// use serde_json::json;
/// use sras_core::action::wrap_action;
/// use sras_core::accounting::AccountInput;
/// use sras_shared::AppError;
///
/// # tokio_test_block(async {
/// let create = wrap_action(|input: AccountInput| async move {
///     Ok::<_, AppError>(input.code.into_inner())
/// });
/// let result = create.call(&json!({"code": "cash", "name": "Cash", "type": "ASSET"})).await;
/// assert_eq!(result.data().map(String::as_str), Some("CASH"));
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
pub const fn wrap_action<I, H>(handler: H) -> Action<I, H>
where
    I: Contract,
{
    Action {
        handler,
        _input: PhantomData,
    }
}

impl<I, H> Action<I, H>
where
    I: Contract,
{
    /// Validates `input` and runs the handler.
    ///
    /// Always resolves to an [`ActionResult`].
    pub async fn call<Fut, T, E>(&self, input: &Value) -> ActionResult<T>
    where
        H: Fn(I) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<AppError>,
    {
        let input = match I::validate(input) {
            Ok(input) => input,
            Err(errors) => {
                tracing::debug!(violations = errors.len(), "Action input rejected");
                return ActionResult::Failure(errors.into());
            }
        };

        match (self.handler)(input).await {
            Ok(data) => ActionResult::Success(data),
            Err(err) => {
                let err = err.into();
                if err.is_unexpected() {
                    tracing::error!(error = %err, code = err.error_code(), "Action failed");
                } else {
                    tracing::debug!(error = %err, code = err.error_code(), "Action rejected");
                }
                ActionResult::Failure(err.into())
            }
        }
    }
}
