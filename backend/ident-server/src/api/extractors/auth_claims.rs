//! Axum extractor for handlers behind `require_auth`

use crate::ApiError;
use crate::middleware::VerifiedClaims;

use ident_auth::Claims;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Claims placed on the request by `require_auth`.
///
/// Rejects with 401 if the route was mounted without the middleware.
pub struct AuthClaims(pub Claims);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<VerifiedClaims>()
            .map(|verified| AuthClaims(verified.0.clone()))
            .ok_or_else(ApiError::unauthorized)
    }
}
