use crate::{
    AuthConfig, ConfigError, ConfigErrorResult, DatabaseConfig, FrontendConfig, LoggingConfig,
    OAuthConfig, ServerConfig, SessionConfig,
};

use std::path::PathBuf;

use log::{info, warn};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub session: SessionConfig,
    pub oauth: OAuthConfig,
    pub frontend: FrontendConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for IDENT_CONFIG_DIR env var, else use ./.ident/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply IDENT_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: IDENT_CONFIG_DIR env var > ./.ident/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var("IDENT_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".ident"))
    }

    /// Validate all configuration.
    ///
    /// Every secret and provider credential is mandatory; a failure here must
    /// stop the process before it accepts traffic.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.session.validate()?;
        self.oauth.validate()?;
        self.frontend.validate()?;

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!(
            "  database: {} (pool {}, timeout {}s)",
            self.database.path, self.database.max_connections, self.database.timeout_secs
        );
        info!(
            "  auth: HS256 ({}), bcrypt cost {}",
            if self.auth.jwt_secret.is_some() {
                "key configured"
            } else {
                "NO KEY"
            },
            self.auth.bcrypt_cost
        );
        info!(
            "  session: {} (secure cookies: {})",
            if self.session.key.is_some() {
                "key configured"
            } else {
                "NO KEY"
            },
            self.session.secure
        );
        if !self.session.secure {
            warn!("  session.secure is false; enable it whenever serving over TLS");
        }
        info!(
            "  oauth: provider={} client_id={} callback={} timeout={}s",
            self.oauth.provider,
            self.oauth.client_id.as_deref().unwrap_or("<unset>"),
            self.oauth.callback_url.as_deref().unwrap_or("<unset>"),
            self.oauth.timeout_secs
        );
        info!(
            "  frontend: home={} login={}",
            self.frontend.home_url(),
            self.frontend.login_url
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("IDENT_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("IDENT_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("IDENT_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "IDENT_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );
        Self::apply_env_parse(
            "IDENT_DATABASE_TIMEOUT_SECS",
            &mut self.database.timeout_secs,
        );

        // Auth
        Self::apply_env_option_string("IDENT_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_parse("IDENT_AUTH_BCRYPT_COST", &mut self.auth.bcrypt_cost);

        // Session
        Self::apply_env_option_string("IDENT_SESSION_KEY", &mut self.session.key);
        Self::apply_env_bool("IDENT_SESSION_SECURE", &mut self.session.secure);

        // OAuth
        Self::apply_env_string("IDENT_OAUTH_PROVIDER", &mut self.oauth.provider);
        Self::apply_env_option_string("IDENT_OAUTH_CLIENT_ID", &mut self.oauth.client_id);
        Self::apply_env_option_string(
            "IDENT_OAUTH_CLIENT_SECRET",
            &mut self.oauth.client_secret,
        );
        Self::apply_env_option_string(
            "IDENT_OAUTH_CALLBACK_URL",
            &mut self.oauth.callback_url,
        );
        Self::apply_env_string("IDENT_OAUTH_AUTH_URL", &mut self.oauth.auth_url);
        Self::apply_env_string("IDENT_OAUTH_TOKEN_URL", &mut self.oauth.token_url);
        Self::apply_env_string("IDENT_OAUTH_USERINFO_URL", &mut self.oauth.userinfo_url);
        Self::apply_env_parse("IDENT_OAUTH_TIMEOUT_SECS", &mut self.oauth.timeout_secs);
        Self::apply_env_parse(
            "IDENT_OAUTH_HANDSHAKE_TTL_SECS",
            &mut self.oauth.handshake_ttl_secs,
        );

        // Frontend
        Self::apply_env_string("IDENT_FRONTEND_URL", &mut self.frontend.base_url);
        Self::apply_env_string("IDENT_LOGIN_URL", &mut self.frontend.login_url);

        // Logging
        Self::apply_env_parse("IDENT_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("IDENT_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("IDENT_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
