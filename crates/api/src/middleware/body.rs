//! Action request bodies.
//!
//! A POST body that is not JSON still has to answer with the action envelope,
//! and only after the caller's permission has been checked. The extractor
//! therefore never rejects; a bad body is kept and reported when the action
//! runs.

use std::convert::Infallible;
use std::future::Future;

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::Value;
use sras_core::action::{Action, ActionError, ActionResult};
use sras_core::validation::{Contract, ValidationErrors};
use sras_shared::AppError;
use tracing::debug;

/// The JSON body of an action request.
#[derive(Debug, Clone)]
pub struct ActionBody(Result<Value, ActionError>);

impl ActionBody {
    /// Validates the body against `action`'s contract and runs it.
    pub async fn run<I, H, Fut, T, E>(&self, action: &Action<I, H>) -> ActionResult<T>
    where
        I: Contract,
        H: Fn(I) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<AppError>,
    {
        match &self.0 {
            Ok(body) => action.call(body).await,
            Err(err) => ActionResult::Failure(err.clone()),
        }
    }
}

impl<S> FromRequest<S> for ActionBody
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(value),
            Err(rejection) => {
                debug!(status = %rejection.status(), "Request body is not JSON");
                Err(ValidationErrors::single("", rejection.body_text()).into())
            }
        };
        Ok(Self(body))
    }
}
