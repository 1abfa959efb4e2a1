pub mod auth;
pub mod panic_boundary;

pub use auth::{VerifiedClaims, require_auth};
pub use panic_boundary::panic_boundary;
