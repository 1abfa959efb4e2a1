mod auth_provider;
mod user_identity;
