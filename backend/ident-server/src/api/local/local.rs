//! Email + password handlers

use crate::ApiResult;
use crate::api::local::{
    login_request::LoginRequest,
    login_response::{LOGIN_SUCCESS_MESSAGE, LoginResponse},
    signup_request::SignupRequest,
};
use crate::app_state::AppState;
use crate::login::SignupOutcome;

use ident_auth::{JWT_COOKIE, TOKEN_TTL_SECS, set_cookie};

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use log::debug;

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(request) = payload?;

    let outcome = state.login.login(&request.email, &request.password).await?;
    let cookie = set_cookie(
        JWT_COOKIE,
        &outcome.token,
        TOKEN_TTL_SECS,
        state.sessions.secure(),
    );

    Ok((
        StatusCode::ACCEPTED,
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LoginResponse {
            message: LOGIN_SUCCESS_MESSAGE,
            token: outcome.token,
        }),
    )
        .into_response())
}

/// POST /signup
///
/// Redirects to the login page whether the account was created or already existed.
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<Redirect> {
    let Json(request) = payload?;

    let outcome = state
        .login
        .signup(&request.email, &request.password, &request.name)
        .await?;

    if outcome == SignupOutcome::AlreadyExists {
        debug!("Signup redirected without creating an account");
    }

    Ok(Redirect::to(&state.login_url))
}
