use chrono::{Duration, Utc};
use ident_core::UserIdentity;

/// A local identity whose last login is a day old
pub fn create_local_identity(email: &str) -> UserIdentity {
    let mut identity = UserIdentity::new_local(
        email,
        "Test User".to_string(),
        "$2b$04$abcdefghijklmnopqrstuuJ0WkqYQ3p5Bz7lG8hD1mLx1Yd6q9bSa".to_string(),
    );
    let yesterday = Utc::now() - Duration::days(1);
    identity.last_login_at = yesterday;
    identity.created_at = yesterday;
    identity
}

pub fn create_oauth_identity(email: &str, external_id: &str) -> UserIdentity {
    UserIdentity::new_oauth(email, "Provider User".to_string(), external_id.to_string())
}
