pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod login;
pub mod middleware;
pub mod oauth;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    extractors::auth_claims::AuthClaims,
    local::{
        local::{login, signup},
        login_request::LoginRequest,
        login_response::LoginResponse,
        signup_request::SignupRequest,
    },
    oauth::{
        oauth::{auth_status, begin_auth, complete_auth, logout},
        status_response::StatusResponse,
    },
};
pub use app_state::AppState;
pub use login::{LoginError, LoginOutcome, LoginService, SignupOutcome};
pub use oauth::{
    CallbackQuery, FailedAuth, GoogleProvider, IdentityProvider, OAuthCoordinator, OAuthError,
    ProviderAssertion,
};

pub use crate::routes::build_router;
