use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("JWT signing key is not configured {location}")]
    MissingSigningKey { location: ErrorLocation },

    #[error("Session key is not configured {location}")]
    MissingSessionKey { location: ErrorLocation },

    /// Every token rejection collapses into this; the cause is only logged
    #[error("Unauthorized {location}")]
    Unauthorized { location: ErrorLocation },

    /// Unknown email and wrong password are deliberately indistinguishable
    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    #[error("Token signing failed: {source} {location}")]
    TokenIssue {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {source} {location}")]
    PasswordHash {
        #[source]
        source: bcrypt::BcryptError,
        location: ErrorLocation,
    },

    #[error("Session encoding failed: {message} {location}")]
    SessionEncoding {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    #[track_caller]
    pub fn unauthorized() -> Self {
        Self::Unauthorized {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
