//! JSON body extractor with `{"error": ...}` rejections.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// Like [`axum::Json`], but every rejection (missing content type, syntax
/// error, wrong field types) becomes a 400 [`AppError`] so clients see the
/// same body shape as for domain validation errors.
///
/// ```ignore
/// async fn create(JsonBody(input): JsonBody<CreateTask>) -> Result<Json<Task>, AppError> {
///     ...
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(data))
    }
}
