use crate::{ConfigError, ConfigErrorResult, MIN_SECRET_LENGTH};

use serde::Deserialize;

/// Encrypted cookie session used during the provider handshake
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Cookie encryption key. Required: provider login cannot work without it.
    pub key: Option<String>,
    /// Mark cookies `Secure`. Must be true whenever the service is served over TLS.
    pub secure: bool,
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let key = self.key.as_deref().unwrap_or_default();

        if key.trim().is_empty() {
            return Err(ConfigError::session(
                "session.key is required (set IDENT_SESSION_KEY)",
            ));
        }

        if key.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::session(format!(
                "session.key must be at least {MIN_SECRET_LENGTH} characters"
            )));
        }

        Ok(())
    }
}
