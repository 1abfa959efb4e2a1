mod config;

use std::env;

use tempfile::TempDir;

pub(crate) const TEST_JWT_SECRET: &str = "test-jwt-secret-0123456789abcdef0123";
pub(crate) const TEST_SESSION_KEY: &str = "test-session-key-0123456789abcdef012";

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Create a temp config directory and set IDENT_CONFIG_DIR
pub(crate) fn setup_config_dir() -> (TempDir, EnvGuard) {
    let temp = TempDir::new().unwrap();
    let guard = EnvGuard::set("IDENT_CONFIG_DIR", temp.path().to_str().unwrap());
    (temp, guard)
}

/// Set every secret and provider credential needed for validate() to pass
pub(crate) fn required_env() -> Vec<EnvGuard> {
    vec![
        EnvGuard::set("IDENT_AUTH_JWT_SECRET", TEST_JWT_SECRET),
        EnvGuard::set("IDENT_SESSION_KEY", TEST_SESSION_KEY),
        EnvGuard::set("IDENT_OAUTH_CLIENT_ID", "client-id"),
        EnvGuard::set("IDENT_OAUTH_CLIENT_SECRET", "client-secret"),
        EnvGuard::set(
            "IDENT_OAUTH_CALLBACK_URL",
            "http://localhost:8000/auth/google/callback",
        ),
    ]
}
