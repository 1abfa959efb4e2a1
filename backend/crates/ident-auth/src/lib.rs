pub mod claims;
pub mod cookies;
pub mod error;
pub mod password;
pub mod session_store;
pub mod state;
pub mod token_service;

pub use claims::Claims;
pub use cookies::{expire_cookie, find_cookie, set_cookie};
pub use error::{AuthError, Result};
pub use password::PasswordHasher;
pub use session_store::{SESSION_COOKIE, SESSION_MAX_AGE_SECS, SessionData, SessionStore};
pub use state::generate_state;
pub use token_service::{JWT_COOKIE, TOKEN_TTL_SECS, TokenService};

#[cfg(test)]
mod tests;
