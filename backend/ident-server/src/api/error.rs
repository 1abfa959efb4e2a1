//! REST API error types
//!
//! Every failure leaves the service as `{"error": "..."}` with a fixed status.
//! Internal detail (store errors, provider failures, panics) is logged with
//! its location and never sent to the client.

use crate::login::LoginError;
use crate::oauth::OAuthError;

use ident_auth::AuthError;
use ident_core::CoreError;
use ident_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized access";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid credentials";
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
    /// Offending field for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request body or field (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Missing or rejected bearer token (401)
    #[error("Unauthorized {location}")]
    Unauthorized { location: ErrorLocation },

    /// Unknown email or wrong password (401)
    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    /// Bad handshake or incomplete provider assertion (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// Email already owned by another login method (409)
    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    /// Unknown provider route (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Store, provider or signing failure (500)
    #[error("Dependency failure: {message} {location}")]
    Dependency {
        message: String,
        location: ErrorLocation,
    },

    /// Anything else, including recovered panics (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn unauthorized() -> Self {
        Self::Unauthorized {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn dependency(message: impl Into<String>) -> Self {
        Self::Dependency {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } | Self::InvalidCredentials { .. } => {
                StatusCode::UNAUTHORIZED
            }
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Dependency { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let body = match self {
            Self::Validation { message, field, .. } => ApiErrorResponse {
                error: message,
                field,
            },
            Self::Unauthorized { .. } => ApiErrorResponse {
                error: UNAUTHORIZED_MESSAGE.to_string(),
                field: None,
            },
            Self::InvalidCredentials { .. } => ApiErrorResponse {
                error: INVALID_CREDENTIALS_MESSAGE.to_string(),
                field: None,
            },
            Self::BadRequest { message, .. }
            | Self::Conflict { message, .. }
            | Self::NotFound { message, .. } => ApiErrorResponse {
                error: message,
                field: None,
            },
            Self::Dependency { .. } | Self::Internal { .. } => ApiErrorResponse {
                error: INTERNAL_MESSAGE.to_string(),
                field: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        ApiError::Validation {
            message: e.client_message(),
            field: e.field().map(str::to_string),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Unparseable or mistyped JSON bodies are client errors
impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(e: JsonRejection) -> Self {
        ApiError::Validation {
            message: format!("invalid request body: {}", e.body_text()),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        match e {
            DbError::Conflict { field, .. } => ApiError::Conflict {
                message: format!("{field} already registered"),
                location: ErrorLocation::from(Location::caller()),
            },
            other => ApiError::dependency(format!("identity store: {other}")),
        }
    }
}

impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Unauthorized { .. } => ApiError::unauthorized(),
            AuthError::InvalidCredentials { .. } => ApiError::InvalidCredentials {
                location: ErrorLocation::from(Location::caller()),
            },
            other => ApiError::dependency(other.to_string()),
        }
    }
}

impl From<LoginError> for ApiError {
    #[track_caller]
    fn from(e: LoginError) -> Self {
        match e {
            LoginError::Validation(core) => core.into(),
            LoginError::Auth(auth) => auth.into(),
            LoginError::Store(db) => db.into(),
            LoginError::Worker { message } => ApiError::internal(message),
        }
    }
}

impl From<OAuthError> for ApiError {
    #[track_caller]
    fn from(e: OAuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            OAuthError::UnknownProvider { name, .. } => ApiError::NotFound {
                message: format!("unknown identity provider '{name}'"),
                location,
            },
            OAuthError::ProviderDenied { reason, .. } => ApiError::BadRequest {
                message: format!("identity provider refused the login: {reason}"),
                location,
            },
            OAuthError::InvalidState {
                reason,
                location: origin,
            } => {
                log::warn!("OAuth handshake rejected: {} {}", reason, origin);
                ApiError::BadRequest {
                    message: "invalid or expired login attempt".to_string(),
                    location,
                }
            }
            OAuthError::MissingCode { .. } => ApiError::BadRequest {
                message: "authorization code missing".to_string(),
                location,
            },
            OAuthError::MissingEmail { .. } => ApiError::BadRequest {
                message: "identity provider did not return an email".to_string(),
                location,
            },
            OAuthError::AccountConflict { .. } => ApiError::Conflict {
                message: "email is already registered with a password".to_string(),
                location,
            },
            OAuthError::IdentityUnresolved { .. } => ApiError::Conflict {
                message: "account changed during login, try again".to_string(),
                location,
            },
            OAuthError::Provider { message, .. } => ApiError::Dependency {
                message: format!("identity provider: {message}"),
                location,
            },
            OAuthError::Store { source, .. } => ApiError::Dependency {
                message: format!("identity store: {source}"),
                location,
            },
            OAuthError::Auth { source, .. } => ApiError::Dependency {
                message: source.to_string(),
                location,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
