use crate::oauth_config::is_http_url;
use crate::{ConfigError, ConfigErrorResult, DEFAULT_FRONTEND_URL, DEFAULT_LOGIN_URL};

use serde::Deserialize;

/// Where the browser is sent after login and signup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Application base; provider login lands on `{base_url}/home`
    pub base_url: String,
    /// Signup redirects here
    pub login_url: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_FRONTEND_URL),
            login_url: String::from(DEFAULT_LOGIN_URL),
        }
    }
}

impl FrontendConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !is_http_url(&self.base_url) {
            return Err(ConfigError::frontend(format!(
                "frontend.base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }

        if !is_http_url(&self.login_url) {
            return Err(ConfigError::frontend(format!(
                "frontend.login_url must be an http(s) URL, got '{}'",
                self.login_url
            )));
        }

        Ok(())
    }

    /// Post-login landing page
    pub fn home_url(&self) -> String {
        format!("{}/home", self.base_url.trim_end_matches('/'))
    }
}
