//! Stateless bearer tokens.
//!
//! Tokens are HS256-signed and live for exactly 24 hours. Verification checks
//! the algorithm family, the signature and expiry (no leeway) and nothing
//! else; every rejection looks the same to the caller.

use crate::{AuthError, Claims, Result as AuthErrorResult};

use ident_core::{ErrorLocation, UserIdentity};

use std::panic::Location;

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
};
use log::warn;
use serde_json::{Map, Value};

/// Token lifetime: `exp - iat`
pub const TOKEN_TTL_SECS: i64 = 86_400;

/// Cookie fallback for browsers that cannot set `Authorization`
pub const JWT_COOKIE: &str = "jwt";

const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Build from the configured signing key. An empty key is a startup error.
    #[track_caller]
    pub fn new(secret: &str) -> AuthErrorResult<Self> {
        if secret.trim().is_empty() {
            return Err(AuthError::MissingSigningKey {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Sign `claims` with `iat = now` and `exp = now + 24h` (overwriting any given).
    #[track_caller]
    pub fn issue(&self, mut claims: Map<String, Value>) -> AuthErrorResult<String> {
        let now = Utc::now().timestamp();
        claims.insert("iat".to_string(), Value::from(now));
        claims.insert("exp".to_string(), Value::from(now + TOKEN_TTL_SECS));

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|source| {
            AuthError::TokenIssue {
                source,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// Token for an authenticated identity: `sub`, `name`, `email`.
    #[track_caller]
    pub fn issue_for(&self, identity: &UserIdentity) -> AuthErrorResult<String> {
        let mut claims = Map::new();
        claims.insert("sub".to_string(), Value::from(identity.id.to_string()));
        claims.insert("name".to_string(), Value::from(identity.display_name.clone()));
        claims.insert("email".to_string(), Value::from(identity.email.clone()));

        self.issue(claims)
    }

    /// Verify a token and return its claims, or a uniform `Unauthorized`.
    #[track_caller]
    pub fn verify(&self, token: &str) -> AuthErrorResult<Claims> {
        let header = decode_header(token).map_err(|e| {
            warn!("Rejected token: malformed header ({})", e);
            AuthError::unauthorized()
        })?;

        if !ACCEPTED_ALGORITHMS.contains(&header.alg) {
            warn!("Rejected token: unexpected signing algorithm {:?}", header.alg);
            return Err(AuthError::unauthorized());
        }

        let data = decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                warn!("Rejected token: {}", e);
                AuthError::unauthorized()
            })?;

        let claims = Claims::new(data.claims);

        // The library tolerates exp == now; we do not
        match claims.exp() {
            Some(exp) if exp > Utc::now().timestamp() => Ok(claims),
            _ => {
                warn!("Rejected token: expired");
                Err(AuthError::unauthorized())
            }
        }
    }
}
