use crate::error::Result as ServerErrorResult;
use crate::login::LoginService;
use crate::oauth::{IdentityProvider, OAuthCoordinator};

use ident_auth::{PasswordHasher, SessionStore, TokenService};
use ident_config::Config;
use ident_db::IdentityRepository;

use std::sync::Arc;

use log::info;
use sqlx::SqlitePool;

/// Everything a request handler needs. Built once in `main`.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub identities: IdentityRepository,
    pub tokens: Arc<TokenService>,
    pub sessions: Arc<SessionStore>,
    pub oauth: Arc<OAuthCoordinator>,
    pub login: Arc<LoginService>,
    /// Signup redirect target
    pub login_url: String,
}

impl AppState {
    /// Wire the services from validated config, using the configured provider.
    pub fn from_config(config: &Config, pool: SqlitePool) -> ServerErrorResult<Self> {
        Self::assemble(config, pool, |sessions, tokens, identities| {
            Ok(OAuthCoordinator::from_config(
                config, sessions, tokens, identities,
            )?)
        })
    }

    /// Same as `from_config` with an explicit identity provider.
    pub fn with_provider(
        config: &Config,
        pool: SqlitePool,
        provider: Arc<dyn IdentityProvider>,
    ) -> ServerErrorResult<Self> {
        Self::assemble(config, pool, |sessions, tokens, identities| {
            Ok(OAuthCoordinator::new(
                sessions,
                provider,
                tokens,
                identities,
                config.frontend.home_url(),
                config.oauth.handshake_ttl(),
            ))
        })
    }

    /// The session store is initialized before the coordinator is built;
    /// a missing key stops startup here.
    fn assemble<F>(config: &Config, pool: SqlitePool, oauth: F) -> ServerErrorResult<Self>
    where
        F: FnOnce(
            Arc<SessionStore>,
            Arc<TokenService>,
            IdentityRepository,
        ) -> ServerErrorResult<OAuthCoordinator>,
    {
        let tokens = Arc::new(TokenService::new(
            config.auth.jwt_secret.as_deref().unwrap_or_default(),
        )?);
        info!("Token service initialized (HS256)");

        let sessions = Arc::new(SessionStore::init(
            config.session.key.as_deref().unwrap_or_default(),
            config.session.secure,
        )?);
        info!("Session store initialized");

        let identities = IdentityRepository::new(pool.clone(), config.database.timeout());

        let oauth = Arc::new(oauth(
            Arc::clone(&sessions),
            Arc::clone(&tokens),
            identities.clone(),
        )?);

        let login = Arc::new(LoginService::new(
            identities.clone(),
            Arc::clone(&tokens),
            PasswordHasher::new(config.auth.bcrypt_cost)?,
        ));

        Ok(Self {
            pool,
            identities,
            tokens,
            sessions,
            oauth,
            login,
            login_url: config.frontend.login_url.clone(),
        })
    }
}
