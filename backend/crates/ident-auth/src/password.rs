use crate::{AuthError, Result as AuthErrorResult};

use ident_core::ErrorLocation;

use std::panic::Location;

use log::warn;

/// bcrypt wrapper.
///
/// Uses the non-truncating bcrypt calls: a password over 72 bytes fails to
/// hash and never verifies, instead of matching on its first 72 bytes.
///
/// Holds a hash of a throwaway password so that a login for an unknown email
/// can run one full verification, matching the cost of a real mismatch.
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: String,
}

impl PasswordHasher {
    #[track_caller]
    pub fn new(cost: u32) -> AuthErrorResult<Self> {
        let dummy_hash = bcrypt::non_truncating_hash("not-a-real-password", cost).map_err(
            |source| AuthError::PasswordHash {
                source,
                location: ErrorLocation::from(Location::caller()),
            },
        )?;

        Ok(Self { cost, dummy_hash })
    }

    #[track_caller]
    pub fn hash(&self, password: &str) -> AuthErrorResult<String> {
        bcrypt::non_truncating_hash(password, self.cost).map_err(|source| {
            AuthError::PasswordHash {
                source,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// Constant-time comparison. A corrupt stored hash or an over-long
    /// password counts as a mismatch.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match bcrypt::non_truncating_verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                warn!("Password verification failed: {}", e);
                false
            }
        }
    }

    /// Burn one verification against the dummy hash. Always false.
    pub fn verify_dummy(&self, password: &str) -> bool {
        let _ = bcrypt::non_truncating_verify(password, &self.dummy_hash);
        false
    }
}
