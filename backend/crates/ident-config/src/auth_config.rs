use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_BCRYPT_COST, MAX_BCRYPT_COST, MIN_BCRYPT_COST,
    MIN_SECRET_LENGTH,
};

use serde::Deserialize;

/// Bearer token signing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing key. Required: the service refuses to start without it.
    pub jwt_secret: Option<String>,
    /// Work factor for local password hashes
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let secret = self.jwt_secret.as_deref().unwrap_or_default();

        if secret.trim().is_empty() {
            return Err(ConfigError::auth(
                "auth.jwt_secret is required (set IDENT_AUTH_JWT_SECRET)",
            ));
        }

        if secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::auth(format!(
                "auth.jwt_secret must be at least {MIN_SECRET_LENGTH} characters"
            )));
        }

        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::auth(format!(
                "auth.bcrypt_cost must be {}-{}, got {}",
                MIN_BCRYPT_COST, MAX_BCRYPT_COST, self.bcrypt_cost
            )));
        }

        Ok(())
    }
}
