use crate::AuthProvider;

/// The provider-specific secret half of an identity.
///
/// Exactly one of password hash / external subject id exists per identity,
/// so the two are modelled as variants rather than two optional fields.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Local { password_hash: String },
    OAuth { external_id: String },
}

impl Credential {
    pub fn provider(&self) -> AuthProvider {
        match self {
            Self::Local { .. } => AuthProvider::Local,
            Self::OAuth { .. } => AuthProvider::OAuth,
        }
    }

    pub fn password_hash(&self) -> Option<&str> {
        match self {
            Self::Local { password_hash } => Some(password_hash),
            Self::OAuth { .. } => None,
        }
    }

    pub fn external_id(&self) -> Option<&str> {
        match self {
            Self::Local { .. } => None,
            Self::OAuth { external_id } => Some(external_id),
        }
    }
}

// Hashes stay out of logs
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local { .. } => f
                .debug_struct("Local")
                .field("password_hash", &"<redacted>")
                .finish(),
            Self::OAuth { external_id } => f
                .debug_struct("OAuth")
                .field("external_id", external_id)
                .finish(),
        }
    }
}
