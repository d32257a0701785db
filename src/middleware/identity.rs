use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use crate::{error::AppError, models::UserId};

/// Header set by the upstream authentication layer
pub const USER_ID_HEADER: &str = "x-user-id";

/// The user a request acts on behalf of
///
/// Login and sessions live in front of this service. Handlers take this
/// extractor and pass the id down explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        headers
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|id| *id > 0)
            .map(|id| Self(UserId(id)))
            .ok_or(AppError::Unauthorized)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers)
    }
}
