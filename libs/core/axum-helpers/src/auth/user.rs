use super::{INVALID_TOKEN, MISSING_TOKEN, jwt::JwtClaims};
use crate::errors::AppError;
use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use uuid::Uuid;

/// The authenticated user's id, taken from claims the JWT middleware left in
/// the request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

fn from_claims(parts: &Parts) -> Result<Option<AuthUser>, AppError> {
    match parts.extensions.get::<JwtClaims>() {
        None => Ok(None),
        Some(claims) => claims
            .user_id()
            .map(|id| Some(AuthUser(id)))
            .ok_or_else(|| AppError::Unauthorized(INVALID_TOKEN.to_string())),
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        from_claims(parts)?.ok_or_else(|| AppError::Unauthorized(MISSING_TOKEN.to_string()))
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(from_claims(parts).ok().flatten())
    }
}
