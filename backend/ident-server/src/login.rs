//! Email + password login and signup.
//!
//! Unknown email and wrong password produce the same error after the same
//! amount of bcrypt work, and signup hashes whether or not the email exists.
//! Hashing runs on the blocking pool.

use ident_auth::{AuthError, PasswordHasher, TokenService};
use ident_core::{
    CoreError, UserIdentity, normalize_email, validate_display_name, validate_email,
    validate_password, validate_required,
};
use ident_db::{DbError, IdentityRepository};

use std::sync::Arc;

use log::{debug, info, warn};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoginError {
    #[error(transparent)]
    Validation(#[from] CoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] DbError),

    #[error("password worker failed: {message}")]
    Worker { message: String },
}

pub type Result<T> = std::result::Result<T, LoginError>;

#[derive(Debug)]
pub struct LoginOutcome {
    pub identity: UserIdentity,
    pub token: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SignupOutcome {
    Created,
    /// Email already registered; nothing was changed
    AlreadyExists,
}

pub struct LoginService {
    identities: IdentityRepository,
    tokens: Arc<TokenService>,
    hasher: Arc<PasswordHasher>,
}

impl LoginService {
    pub fn new(
        identities: IdentityRepository,
        tokens: Arc<TokenService>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            identities,
            tokens,
            hasher: Arc::new(hasher),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        validate_email(email)?;
        validate_required("password", password)?;

        let existing = self.identities.find_by_email(email).await?;
        let stored_hash = existing
            .as_ref()
            .and_then(|identity| identity.password_hash())
            .map(str::to_string);

        let password = password.to_string();
        let hasher = Arc::clone(&self.hasher);
        let verified = self
            .blocking(move || match stored_hash {
                Some(hash) => hasher.verify(&password, &hash),
                None => hasher.verify_dummy(&password),
            })
            .await?;

        let identity = match existing {
            Some(identity) if verified => identity,
            _ => {
                debug!("Login rejected");
                return Err(AuthError::invalid_credentials().into());
            }
        };

        if let Err(e) = self.identities.touch_last_login(&identity.email).await {
            warn!("Failed to record login time: {}", e);
        }

        let token = self.tokens.issue_for(&identity)?;
        info!("Local login for identity {}", identity.id);

        Ok(LoginOutcome { identity, token })
    }

    /// Register a password account. Existing emails are a silent no-op.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<SignupOutcome> {
        validate_email(email)?;
        validate_password(password)?;
        validate_display_name(display_name)?;

        let email = normalize_email(email);

        // Hash before the lookup so an existing email costs the same as a new one
        let password = password.to_string();
        let hasher = Arc::clone(&self.hasher);
        let password_hash = self.blocking(move || hasher.hash(&password)).await??;

        if self.identities.find_by_email(&email).await?.is_some() {
            debug!("Signup for an existing email ignored");
            return Ok(SignupOutcome::AlreadyExists);
        }

        let identity =
            UserIdentity::new_local(&email, display_name.trim().to_string(), password_hash);

        match self.identities.create(&identity).await {
            Ok(()) => {
                info!("Created local identity {}", identity.id);
                Ok(SignupOutcome::Created)
            }
            // Lost a race with a concurrent signup for the same email
            Err(e) if e.is_conflict() => Ok(SignupOutcome::AlreadyExists),
            Err(e) => Err(e.into()),
        }
    }

    async fn blocking<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(work)
            .await
            .map_err(|e| LoginError::Worker {
                message: e.to_string(),
            })
    }
}
