use crate::{AuthProvider, UserIdentity};

use googletest::prelude::*;

#[test]
fn given_local_identity_when_created_then_only_password_hash_is_present() {
    let identity = UserIdentity::new_local(
        "  Alice@Example.COM ",
        "Alice".to_string(),
        "$2b$04$hash".to_string(),
    );

    assert_that!(identity.auth_provider(), eq(AuthProvider::Local));
    assert_that!(identity.password_hash(), some(eq("$2b$04$hash")));
    assert_that!(identity.external_id(), none());
    assert_that!(identity.email.as_str(), eq("alice@example.com"));
    assert_that!(identity.last_login_at, eq(identity.created_at));
}

#[test]
fn given_oauth_identity_when_created_then_only_external_id_is_present() {
    let identity =
        UserIdentity::new_oauth("bob@example.com", "Bob".to_string(), "sub-42".to_string());

    assert_that!(identity.auth_provider(), eq(AuthProvider::OAuth));
    assert_that!(identity.external_id(), some(eq("sub-42")));
    assert_that!(identity.password_hash(), none());
}

#[test]
fn given_local_identity_when_debug_formatted_then_hash_is_redacted() {
    let identity = UserIdentity::new_local(
        "carol@example.com",
        "Carol".to_string(),
        "$2b$04$supersecrethash".to_string(),
    );

    let debug = format!("{identity:?}");

    assert_that!(debug, not(contains_substring("supersecrethash")));
    assert_that!(debug, contains_substring("<redacted>"));
}
