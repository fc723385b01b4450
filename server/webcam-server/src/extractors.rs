use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use error_common::ErrorKind;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Query string extractor that rejects with a structured [`ApiError`]
/// (`SchemaViolation`) instead of axum's plain-text 400
///
/// Usage:
/// ```rust,ignore
/// pub async fn handler(ApiQuery(query): ApiQuery<ImageQuery>) { /* ... */ }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::new(ErrorKind::SchemaViolation, rejection.body_text()))?;
        Ok(ApiQuery(value))
    }
}
