pub mod auth_provider;
pub mod credential;
pub mod user_identity;
