//! Provider login and session status handlers

use crate::{ApiError, ApiResult};
use crate::api::oauth::status_response::StatusResponse;
use crate::app_state::AppState;
use crate::oauth::CallbackQuery;

use ident_auth::{JWT_COOKIE, expire_cookie};

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};

/// GET /auth/{provider}
pub async fn begin_auth(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let session = state.sessions.load(cookie_header(&headers));
    let begun = state.oauth.begin_auth(&provider, session)?;

    Ok((
        AppendHeaders([(header::SET_COOKIE, begun.session_cookie)]),
        Redirect::to(&begun.redirect_url),
    )
        .into_response())
}

/// GET /auth/{provider}/callback
pub async fn complete_auth(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(query): Query<CallbackQuery>,
    headers: HeaderMap,
) -> Response {
    let session = state.sessions.load(cookie_header(&headers));

    match state.oauth.complete_auth(&provider, query, session).await {
        Ok(completed) => (
            AppendHeaders([
                (header::SET_COOKIE, completed.jwt_cookie),
                (header::SET_COOKIE, completed.session_cookie),
            ]),
            Redirect::to(&completed.redirect_url),
        )
            .into_response(),
        Err(failed) => {
            let error = ApiError::from(failed.error);
            match failed.session_cookie {
                Some(cookie) => {
                    (AppendHeaders([(header::SET_COOKIE, cookie)]), error).into_response()
                }
                None => error.into_response(),
            }
        }
    }
}

/// GET /auth/status
pub async fn auth_status(State(state): State<AppState>, headers: HeaderMap) -> Json<StatusResponse> {
    let session = state.sessions.load(cookie_header(&headers));

    Json(StatusResponse {
        logged_in: session.email.is_some(),
        email: session.email,
    })
}

/// POST /auth/logout
pub async fn logout(State(state): State<AppState>) -> Response {
    (
        StatusCode::NO_CONTENT,
        AppendHeaders([
            (header::SET_COOKIE, state.sessions.clear()),
            (
                header::SET_COOKIE,
                expire_cookie(JWT_COOKIE, state.sessions.secure()),
            ),
        ]),
    )
        .into_response()
}

/// Browsers send one `Cookie` header; take the first readable one
pub(crate) fn cookie_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
}
