use thiserror::Error;

/// Startup failures. Any of these stops the process before it binds a port.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] ident_config::ConfigError),

    #[error("Auth setup error: {0}")]
    Auth(#[from] ident_auth::AuthError),

    #[error("Database error: {0}")]
    Database(#[from] ident_db::DbError),

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
