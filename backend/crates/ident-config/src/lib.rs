mod auth_config;
mod config;
mod database_config;
mod error;
mod frontend_config;
mod log_level;
mod logging_config;
mod oauth_config;
mod server_config;
mod session_config;

#[cfg(test)]
mod tests;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use frontend_config::FrontendConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use oauth_config::OAuthConfig;
pub use server_config::ServerConfig;
pub use session_config::SessionConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;

const DEFAULT_DATABASE_FILENAME: &str = "identity.db";
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 5;

/// Minimum length for symmetric secrets (JWT signing key, session key)
pub const MIN_SECRET_LENGTH: usize = 32;

const DEFAULT_BCRYPT_COST: u32 = 12;
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

const DEFAULT_OAUTH_PROVIDER: &str = "google";
const DEFAULT_OAUTH_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_OAUTH_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_OAUTH_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;
const DEFAULT_HANDSHAKE_TTL_SECS: u64 = 600;

/// Bounds for any outbound/store timeout
const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 30;

const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_LOGIN_URL: &str = "http://localhost:3000/login";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
