use crate::ApiError;
use crate::app_state::AppState;

use ident_auth::{Claims, JWT_COOKIE, find_cookie};

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use log::debug;

/// Claims of the verified token, attached to the request for downstream handlers
#[derive(Debug, Clone)]
pub struct VerifiedClaims(pub Claims);

/// Reject the request with 401 unless it carries a valid token.
///
/// The token comes from `Authorization: Bearer <t>`, falling back to the
/// `jwt` cookie. The next handler only runs on success.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers()).ok_or_else(|| {
        debug!("Request to {} carried no token", request.uri().path());
        ApiError::unauthorized()
    })?;

    let claims = state.tokens.verify(&token)?;

    request.extensions_mut().insert(VerifiedClaims(claims));
    Ok(next.run(request).await)
}

pub(crate) fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookies| find_cookie(cookies, JWT_COOKIE))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
