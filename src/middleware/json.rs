use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body whose rejections are reported as [`AppError`]
///
/// Axum's own `Json` answers malformed bodies with plain text; this keeps
/// every error response in the `{"error": ...}` shape.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Rejection converts to InvalidInput
        let Json(value) = Json::<T>::from_request(request, state).await?;
        Ok(Self(value))
    }
}
