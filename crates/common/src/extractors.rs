//! Custom axum extractors for Torneo

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::Error;

/// JSON extractor that validates the deserialized value automatically.
///
/// Replaces `Json<T>` + manual `.validate()` calls in handlers.
/// Requires `T: DeserializeOwned + Validate`.
///
/// All input errors (deserialization + validation) return 400.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

/// Rejection type for the validating extractors:
/// - body / query deserialization errors → 400 (via `Error::Validation`)
/// - validation errors → 400 (via `Error::Validation`)
#[derive(Debug)]
pub enum ValidationRejection {
    Json(JsonRejection),
    Query(QueryRejection),
    Validation(Error),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        match self {
            ValidationRejection::Json(e) => Error::Validation(e.body_text()).into_response(),
            ValidationRejection::Query(e) => Error::Validation(e.body_text()).into_response(),
            ValidationRejection::Validation(e) => e.into_response(),
        }
    }
}

fn validation_failed(errors: validator::ValidationErrors) -> ValidationRejection {
    ValidationRejection::Validation(Error::Validation(format!(
        "Validation failed: {}",
        errors
    )))
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::Json)?;
        value.validate().map_err(validation_failed)?;
        Ok(ValidatedJson(value))
    }
}

/// Query-string counterpart of [`ValidatedJson`].
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Query)?;
        value.validate().map_err(validation_failed)?;
        Ok(ValidatedQuery(value))
    }
}
