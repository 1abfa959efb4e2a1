//! Google as an OpenID Connect provider.
//!
//! Endpoints come from config so tests can point them at a mock server.

use crate::oauth::{IdentityProvider, OAuthError, ProviderAssertion, Result as OAuthResult};

use ident_config::{ConfigError, ConfigErrorResult, OAuthConfig};

use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use url::Url;

const SCOPES: &str = "openid email profile";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: String,
    email: Option<String>,
    email_verified: Option<bool>,
    name: Option<String>,
}

pub struct GoogleProvider {
    name: String,
    client_id: String,
    client_secret: String,
    callback_url: String,
    auth_url: Url,
    token_url: String,
    userinfo_url: String,
    http: reqwest::Client,
}

impl GoogleProvider {
    /// Build from validated config. Fails if credentials or endpoints are missing.
    pub fn from_config(config: &OAuthConfig) -> ConfigErrorResult<Self> {
        let required = |name: &str, value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
                .ok_or_else(|| ConfigError::oauth(format!("oauth.{name} is required")))
        };

        let client_id = required("client_id", &config.client_id)?;
        let client_secret = required("client_secret", &config.client_secret)?;
        let callback_url = required("callback_url", &config.callback_url)?;

        let auth_url = Url::parse(&config.auth_url)
            .map_err(|e| ConfigError::oauth(format!("oauth.auth_url is invalid: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::oauth(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            name: config.provider.clone(),
            client_id,
            client_secret,
            callback_url,
            auth_url,
            token_url: config.token_url.clone(),
            userinfo_url: config.userinfo_url.clone(),
            http,
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn authorization_url(&self, state: &str) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.callback_url)
            .append_pair("response_type", "code")
            .append_pair("scope", SCOPES)
            .append_pair("state", state);
        url.into()
    }

    async fn exchange(&self, code: &str) -> OAuthResult<ProviderAssertion> {
        let token: TokenResponse = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.callback_url.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("Exchanged authorization code with {}", self.name);

        let info: UserInfo = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(&token.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if info.sub.trim().is_empty() {
            return Err(OAuthError::provider("userinfo response has an empty subject"));
        }

        let email = match (info.email, info.email_verified) {
            (Some(_), Some(false)) => {
                warn!("Provider returned an unverified email for subject {}", info.sub);
                None
            }
            (email, _) => email.filter(|e| !e.trim().is_empty()),
        };

        Ok(ProviderAssertion {
            subject: info.sub,
            email,
            name: info.name,
        })
    }
}
