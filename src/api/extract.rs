//! Request extractors that reject with the structured error body.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::TrackerError;

/// Query string extractor whose rejection is [`TrackerError::InvalidRequest`].
///
/// A malformed parameter such as `windowDays=abc` therefore answers with the
/// same JSON error body as every other 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = TrackerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection| TrackerError::InvalidRequest(rejection.body_text()))
    }
}
