use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HANDSHAKE_TTL_SECS, DEFAULT_OAUTH_AUTH_URL,
    DEFAULT_OAUTH_PROVIDER, DEFAULT_OAUTH_TOKEN_URL, DEFAULT_OAUTH_USERINFO_URL,
    DEFAULT_PROVIDER_TIMEOUT_SECS, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS,
};

use std::time::Duration;

use serde::Deserialize;

/// The single identity provider this service federates with
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    /// Route name, e.g. `/auth/google`
    pub provider: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Must point at `/auth/{provider}/callback` on this service
    pub callback_url: Option<String>,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    /// Upper bound on each outbound provider call
    pub timeout_secs: u64,
    /// How long a begun handshake stays valid
    pub handshake_ttl_secs: u64,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            provider: String::from(DEFAULT_OAUTH_PROVIDER),
            client_id: None,
            client_secret: None,
            callback_url: None,
            auth_url: String::from(DEFAULT_OAUTH_AUTH_URL),
            token_url: String::from(DEFAULT_OAUTH_TOKEN_URL),
            userinfo_url: String::from(DEFAULT_OAUTH_USERINFO_URL),
            timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
            handshake_ttl_secs: DEFAULT_HANDSHAKE_TTL_SECS,
        }
    }
}

impl OAuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.provider.trim().is_empty() {
            return Err(ConfigError::oauth("oauth.provider cannot be empty"));
        }

        Self::require("oauth.client_id", self.client_id.as_deref())?;
        Self::require("oauth.client_secret", self.client_secret.as_deref())?;
        let callback = Self::require("oauth.callback_url", self.callback_url.as_deref())?;

        for (name, url) in [
            ("oauth.callback_url", callback),
            ("oauth.auth_url", self.auth_url.as_str()),
            ("oauth.token_url", self.token_url.as_str()),
            ("oauth.userinfo_url", self.userinfo_url.as_str()),
        ] {
            if !is_http_url(url) {
                return Err(ConfigError::oauth(format!(
                    "{name} must be an http(s) URL, got '{url}'"
                )));
            }
        }

        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(ConfigError::oauth(format!(
                "oauth.timeout_secs must be {}-{}, got {}",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        if self.handshake_ttl_secs == 0 {
            return Err(ConfigError::oauth("oauth.handshake_ttl_secs must be > 0"));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn handshake_ttl(&self) -> Duration {
        Duration::from_secs(self.handshake_ttl_secs)
    }

    #[track_caller]
    fn require<'a>(name: &str, value: Option<&'a str>) -> ConfigErrorResult<&'a str> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::oauth(format!("{name} is required"))),
        }
    }
}

pub(crate) fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    matches!(rest, Some(host) if !host.is_empty() && !host.starts_with('/'))
}
