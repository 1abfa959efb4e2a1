use ident_auth::AuthError;
use ident_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Ways a provider login can fail between redirect and token issue
#[derive(Error, Debug)]
pub enum OAuthError {
    #[error("unknown identity provider '{name}' {location}")]
    UnknownProvider {
        name: String,
        location: ErrorLocation,
    },

    #[error("provider returned error: {reason} {location}")]
    ProviderDenied {
        reason: String,
        location: ErrorLocation,
    },

    #[error("handshake state rejected: {reason} {location}")]
    InvalidState {
        reason: &'static str,
        location: ErrorLocation,
    },

    #[error("callback carried no authorization code {location}")]
    MissingCode { location: ErrorLocation },

    #[error("provider assertion has no email {location}")]
    MissingEmail { location: ErrorLocation },

    #[error("email {email} belongs to a password account {location}")]
    AccountConflict {
        email: String,
        location: ErrorLocation,
    },

    /// The email row changed between insert and re-read
    #[error("identity for {email} could not be resolved {location}")]
    IdentityUnresolved {
        email: String,
        location: ErrorLocation,
    },

    #[error("provider call failed: {message} {location}")]
    Provider {
        message: String,
        location: ErrorLocation,
    },

    #[error("identity store failed: {source} {location}")]
    Store {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    #[error("token or session failed: {source} {location}")]
    Auth {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },
}

impl OAuthError {
    #[track_caller]
    pub fn unknown_provider(name: impl Into<String>) -> Self {
        Self::UnknownProvider {
            name: name.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn provider_denied(reason: impl Into<String>) -> Self {
        Self::ProviderDenied {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_state(reason: &'static str) -> Self {
        Self::InvalidState {
            reason,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_code() -> Self {
        Self::MissingCode {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_email() -> Self {
        Self::MissingEmail {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn account_conflict(email: impl Into<String>) -> Self {
        Self::AccountConflict {
            email: email.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn identity_unresolved(email: impl Into<String>) -> Self {
        Self::IdentityUnresolved {
            email: email.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for OAuthError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        Self::Store {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<AuthError> for OAuthError {
    #[track_caller]
    fn from(source: AuthError) -> Self {
        Self::Auth {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for OAuthError {
    #[track_caller]
    fn from(e: reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            format!("timed out: {e}")
        } else {
            e.to_string()
        };
        Self::provider(message)
    }
}

pub type Result<T> = std::result::Result<T, OAuthError>;
