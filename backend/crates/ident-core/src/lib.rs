pub mod error;
pub mod models;
pub mod validation;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::auth_provider::AuthProvider;
pub use models::credential::Credential;
pub use models::user_identity::UserIdentity;
pub use validation::{
    MAX_DISPLAY_NAME_LENGTH, MAX_EMAIL_LENGTH, MAX_PASSWORD_BYTES, MIN_PASSWORD_LENGTH,
    normalize_email, validate_display_name, validate_email, validate_password, validate_required,
};

#[cfg(test)]
mod tests;
