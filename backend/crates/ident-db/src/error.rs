use ident_core::ErrorLocation;

use std::panic::Location;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unique constraint violated on '{field}' {location}")]
    Conflict {
        field: &'static str,
        location: ErrorLocation,
    },

    #[error("Stored row is invalid: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Store call '{operation}' timed out after {after:?} {location}")]
    Timeout {
        operation: &'static str,
        after: Duration,
        location: ErrorLocation,
    },
}

impl DbError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    #[track_caller]
    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if let sqlx::Error::Database(db_err) = &source
            && db_err.is_unique_violation()
        {
            // Ids are random v4 UUIDs, so the email index is the one that collides
            return Self::Conflict {
                field: "email",
                location,
            };
        }

        Self::Sqlx { source, location }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
