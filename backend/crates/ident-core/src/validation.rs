//! Format checks for credentials submitted by clients.
//!
//! These are deliberately shallow: they reject obviously malformed input
//! before it reaches the store or the hasher, nothing more.

use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// bcrypt reads at most 72 bytes; anything longer would be silently truncated
pub const MAX_PASSWORD_BYTES: usize = 72;
pub const MAX_DISPLAY_NAME_LENGTH: usize = 100;

/// Trim and ASCII-lowercase an email so lookups and the unique index agree
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[track_caller]
pub fn validate_email(email: &str) -> CoreErrorResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(validation_error("email", "email is required"));
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(validation_error(
            "email",
            format!("email exceeds {MAX_EMAIL_LENGTH} characters"),
        ));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(validation_error("email", "email must not contain whitespace"));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(validation_error("email", "email must contain '@'"));
    };

    if local.is_empty() || domain.contains('@') {
        return Err(validation_error("email", "email is malformed"));
    }

    let labels_ok = domain.split('.').all(|label| !label.is_empty());
    if !domain.contains('.') || !labels_ok {
        return Err(validation_error("email", "email domain is malformed"));
    }

    Ok(())
}

#[track_caller]
pub fn validate_password(password: &str) -> CoreErrorResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(validation_error(
            "password",
            format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(validation_error(
            "password",
            format!("password exceeds {MAX_PASSWORD_BYTES} bytes"),
        ));
    }

    Ok(())
}

#[track_caller]
pub fn validate_display_name(name: &str) -> CoreErrorResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(validation_error("name", "name is required"));
    }
    if name.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        return Err(validation_error(
            "name",
            format!("name exceeds {MAX_DISPLAY_NAME_LENGTH} characters"),
        ));
    }

    Ok(())
}

/// Presence check for fields that have no format rules of their own
#[track_caller]
pub fn validate_required(field: &'static str, value: &str) -> CoreErrorResult<()> {
    if value.is_empty() {
        return Err(validation_error(field, format!("{field} is required")));
    }

    Ok(())
}

#[track_caller]
fn validation_error(field: &'static str, message: impl Into<String>) -> CoreError {
    CoreError::Validation {
        field,
        message: message.into(),
        location: ErrorLocation::from(Location::caller()),
    }
}
