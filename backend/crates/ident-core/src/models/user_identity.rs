//! User identity - the one record shared by local and provider login.

use crate::{AuthProvider, Credential, normalize_email};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A user account. Email is the identity key across both login kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: Uuid,
    pub display_name: String,
    /// Normalized (trimmed, lowercase); unique across all identities
    pub email: String,
    pub credential: Credential,
    /// User-editable metadata, not used for access control
    pub organisation: Option<String>,
    pub last_login_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl UserIdentity {
    /// Create a password-backed identity
    pub fn new_local(email: &str, display_name: String, password_hash: String) -> Self {
        Self::new(
            email,
            display_name,
            Credential::Local { password_hash },
        )
    }

    /// Create an identity asserted by the identity provider
    pub fn new_oauth(email: &str, display_name: String, external_id: String) -> Self {
        Self::new(email, display_name, Credential::OAuth { external_id })
    }

    fn new(email: &str, display_name: String, credential: Credential) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            display_name,
            email: normalize_email(email),
            credential,
            organisation: None,
            last_login_at: now,
            created_at: now,
        }
    }

    pub fn auth_provider(&self) -> AuthProvider {
        self.credential.provider()
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.credential.password_hash()
    }

    pub fn external_id(&self) -> Option<&str> {
        self.credential.external_id()
    }
}
