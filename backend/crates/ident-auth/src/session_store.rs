//! Server-side session, persisted as an encrypted cookie.
//!
//! The cookie value is `base64url(nonce || AES-256-GCM(json))`. The cipher key
//! is SHA-256 of the configured session key. A cookie that is absent,
//! truncated, tampered with or encrypted under another key loads as an empty
//! session.

use crate::{AuthError, Result as AuthErrorResult, expire_cookie, find_cookie, set_cookie};

use ident_core::ErrorLocation;

use std::panic::Location;

use aes_gcm::Aes256Gcm;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, Nonce, OsRng};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub const SESSION_COOKIE: &str = "session";

/// Seven days
pub const SESSION_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

const NONCE_LEN: usize = 12;

/// What the session remembers between requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// Handshake value sent to the provider, cleared once the callback completes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_state: Option<String>,
    /// Unix seconds when `oauth_state` was issued
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_created_at: Option<i64>,
    /// Set after a provider login; read by `/auth/status`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

pub struct SessionStore {
    cipher: Aes256Gcm,
    secure: bool,
}

impl SessionStore {
    /// Initialize once at startup. A blank key is fatal.
    #[track_caller]
    pub fn init(key: &str, secure: bool) -> AuthErrorResult<Self> {
        if key.trim().is_empty() {
            return Err(AuthError::MissingSessionKey {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let digest: [u8; 32] = Sha256::digest(key.as_bytes()).into();
        let cipher = Aes256Gcm::new(&digest.into());

        Ok(Self { cipher, secure })
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    /// Decode the session from a `Cookie` request header.
    pub fn load(&self, cookie_header: Option<&str>) -> SessionData {
        cookie_header
            .and_then(|header| find_cookie(header, SESSION_COOKIE))
            .filter(|value| !value.is_empty())
            .and_then(|value| self.decrypt(value))
            .unwrap_or_default()
    }

    /// Encrypt the session into a `Set-Cookie` value.
    #[track_caller]
    pub fn save(&self, data: &SessionData) -> AuthErrorResult<String> {
        let plaintext = serde_json::to_vec(data).map_err(|e| AuthError::SessionEncoding {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_ref())
            .map_err(|e| AuthError::SessionEncoding {
                message: format!("AES-GCM encryption failed: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        payload.extend_from_slice(&nonce);
        payload.extend_from_slice(&ciphertext);

        Ok(set_cookie(
            SESSION_COOKIE,
            &URL_SAFE_NO_PAD.encode(payload),
            SESSION_MAX_AGE_SECS,
            self.secure,
        ))
    }

    /// `Set-Cookie` value that drops the session.
    pub fn clear(&self) -> String {
        expire_cookie(SESSION_COOKIE, self.secure)
    }

    fn decrypt(&self, value: &str) -> Option<SessionData> {
        let payload = URL_SAFE_NO_PAD.decode(value).ok()?;
        if payload.len() <= NONCE_LEN {
            debug!("Session cookie too short, ignoring");
            return None;
        }

        let (nonce, ciphertext) = payload.split_at(NONCE_LEN);
        let plaintext = match self.cipher.decrypt(Nonce::<Aes256Gcm>::from_slice(nonce), ciphertext) {
            Ok(plaintext) => plaintext,
            Err(_) => {
                debug!("Session cookie failed authentication, ignoring");
                return None;
            }
        };

        serde_json::from_slice(&plaintext).ok()
    }
}
