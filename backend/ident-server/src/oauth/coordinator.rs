//! Provider login, from redirect to issued token.
//!
//! ```text
//! Unauthenticated --begin_auth--> HandshakePending
//! HandshakePending --callback(error)--> Failed
//! HandshakePending --callback(code)--> CallbackReceived
//! CallbackReceived --no email--> Failed
//! CallbackReceived --email--> IdentityResolving (create_or_get)
//! IdentityResolving --> SessionEstablishing --> TokenIssued --> redirect
//! ```
//!
//! A failed callback consumes the pending handshake: the state is cleared from
//! the session so the same value cannot be replayed.
//!
//! The handshake state lives in the encrypted session cookie, so the
//! coordinator cannot exist without an initialized `SessionStore`.

use crate::oauth::{GoogleProvider, IdentityProvider, OAuthError, Result as OAuthResult};

use ident_auth::{
    JWT_COOKIE, SessionData, SessionStore, TOKEN_TTL_SECS, TokenService, generate_state,
    set_cookie,
};
use ident_config::{Config, ConfigErrorResult};
use ident_core::{AuthProvider, UserIdentity, normalize_email};
use ident_db::{DbError, IdentityRepository};

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, info, warn};
use serde::Deserialize;

/// Query string the provider appends to the callback URL
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Result of starting a login
#[derive(Debug)]
pub struct BeginAuth {
    pub redirect_url: String,
    pub session_cookie: String,
}

/// Result of a completed login
#[derive(Debug)]
pub struct CompletedAuth {
    pub identity: UserIdentity,
    pub token: String,
    pub redirect_url: String,
    pub jwt_cookie: String,
    pub session_cookie: String,
}

/// A failed callback, with the session cookie that drops the spent handshake
#[derive(Debug)]
pub struct FailedAuth {
    pub error: OAuthError,
    /// `None` when no handshake was pending or the session could not be saved
    pub session_cookie: Option<String>,
}

pub struct OAuthCoordinator {
    sessions: Arc<SessionStore>,
    provider: Arc<dyn IdentityProvider>,
    tokens: Arc<TokenService>,
    identities: IdentityRepository,
    home_url: String,
    handshake_ttl: Duration,
}

impl OAuthCoordinator {
    pub fn new(
        sessions: Arc<SessionStore>,
        provider: Arc<dyn IdentityProvider>,
        tokens: Arc<TokenService>,
        identities: IdentityRepository,
        home_url: String,
        handshake_ttl: Duration,
    ) -> Self {
        info!("OAuth provider '{}' registered", provider.name());
        Self {
            sessions,
            provider,
            tokens,
            identities,
            home_url,
            handshake_ttl,
        }
    }

    /// Wire the coordinator with the provider named in config.
    pub fn from_config(
        config: &Config,
        sessions: Arc<SessionStore>,
        tokens: Arc<TokenService>,
        identities: IdentityRepository,
    ) -> ConfigErrorResult<Self> {
        let provider = GoogleProvider::from_config(&config.oauth)?;

        Ok(Self::new(
            sessions,
            Arc::new(provider),
            tokens,
            identities,
            config.frontend.home_url(),
            config.oauth.handshake_ttl(),
        ))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Store a fresh handshake state in the session and point the browser at the provider.
    pub fn begin_auth(
        &self,
        provider_name: &str,
        mut session: SessionData,
    ) -> OAuthResult<BeginAuth> {
        self.check_provider(provider_name)?;

        let state = generate_state();
        session.oauth_state = Some(state.clone());
        session.state_created_at = Some(Utc::now().timestamp());

        let session_cookie = self.sessions.save(&session)?;

        Ok(BeginAuth {
            redirect_url: self.provider.authorization_url(&state),
            session_cookie,
        })
    }

    /// Finish the handshake: verify state, exchange the code, resolve the
    /// identity, issue a token and mark the session.
    pub async fn complete_auth(
        &self,
        provider_name: &str,
        query: CallbackQuery,
        session: SessionData,
    ) -> Result<CompletedAuth, FailedAuth> {
        let pending = session.oauth_state.is_some();

        match self.finish(provider_name, query, session.clone()).await {
            Ok(completed) => Ok(completed),
            Err(error) => {
                let session_cookie = if pending {
                    self.clear_handshake(session)
                } else {
                    None
                };
                Err(FailedAuth {
                    error,
                    session_cookie,
                })
            }
        }
    }

    async fn finish(
        &self,
        provider_name: &str,
        query: CallbackQuery,
        mut session: SessionData,
    ) -> OAuthResult<CompletedAuth> {
        self.check_provider(provider_name)?;

        if let Some(reason) = query.error {
            return Err(OAuthError::provider_denied(reason));
        }

        self.check_state(&session, query.state.as_deref())?;

        let Some(code) = query.code.filter(|c| !c.is_empty()) else {
            return Err(OAuthError::missing_code());
        };

        let assertion = self.provider.exchange(&code).await?;

        let Some(email) = assertion
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|e| !e.is_empty())
        else {
            return Err(OAuthError::missing_email());
        };

        let display_name = assertion.name.clone().unwrap_or_else(|| email.clone());
        let identity = self
            .resolve_identity(&email, display_name, assertion.subject)
            .await?;

        if let Err(e) = self.identities.touch_last_login(&identity.email).await {
            warn!("Failed to record login time: {}", e);
        }

        let token = self.tokens.issue_for(&identity)?;

        session.email = Some(identity.email.clone());
        session.oauth_state = None;
        session.state_created_at = None;
        let session_cookie = self.sessions.save(&session)?;

        let jwt_cookie = set_cookie(JWT_COOKIE, &token, TOKEN_TTL_SECS, self.sessions.secure());

        info!("Provider login completed for identity {}", identity.id);

        Ok(CompletedAuth {
            identity,
            token,
            redirect_url: self.home_url.clone(),
            jwt_cookie,
            session_cookie,
        })
    }

    fn clear_handshake(&self, mut session: SessionData) -> Option<String> {
        session.oauth_state = None;
        session.state_created_at = None;

        match self.sessions.save(&session) {
            Ok(cookie) => {
                debug!("Cleared handshake after failed callback");
                Some(cookie)
            }
            Err(e) => {
                warn!("Failed to clear handshake after failed callback: {}", e);
                None
            }
        }
    }

    fn check_provider(&self, provider_name: &str) -> OAuthResult<()> {
        if provider_name == self.provider.name() {
            Ok(())
        } else {
            Err(OAuthError::unknown_provider(provider_name))
        }
    }

    fn check_state(&self, session: &SessionData, returned: Option<&str>) -> OAuthResult<()> {
        let Some(expected) = session.oauth_state.as_deref() else {
            return Err(OAuthError::invalid_state("no handshake in progress"));
        };

        let Some(returned) = returned else {
            return Err(OAuthError::invalid_state("callback carried no state"));
        };

        if !constant_time_eq(expected.as_bytes(), returned.as_bytes()) {
            return Err(OAuthError::invalid_state("state mismatch"));
        }

        let issued_at = session.state_created_at.unwrap_or(0);
        let age = Utc::now().timestamp().saturating_sub(issued_at);
        if age < 0 || age as u64 > self.handshake_ttl.as_secs() {
            return Err(OAuthError::invalid_state("handshake expired"));
        }

        Ok(())
    }

    /// Find or create the provider identity for `email`.
    ///
    /// A password account with the same email is never linked implicitly.
    async fn resolve_identity(
        &self,
        email: &str,
        display_name: String,
        subject: String,
    ) -> OAuthResult<UserIdentity> {
        let candidate = UserIdentity::new_oauth(email, display_name, subject);

        let identity = match self.identities.create_or_get(&candidate).await {
            Ok(identity) => identity,
            // The email row vanished or changed hands between insert and re-read
            Err(DbError::Conflict { .. }) => {
                return Err(OAuthError::identity_unresolved(email));
            }
            Err(e) => return Err(e.into()),
        };

        if identity.auth_provider() != AuthProvider::OAuth {
            return Err(OAuthError::account_conflict(email));
        }

        if identity.id == candidate.id {
            info!("Created provider identity {}", identity.id);
        } else if identity.external_id() != candidate.external_id() {
            warn!(
                "Identity {} signed in with a different provider subject",
                identity.id
            );
        }

        Ok(identity)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
