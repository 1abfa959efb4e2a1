use crate::{AuthProvider, CoreError};

use std::str::FromStr;

use googletest::prelude::*;

#[test]
fn given_each_provider_when_round_tripped_through_str_then_matches() {
    for provider in [AuthProvider::Local, AuthProvider::OAuth] {
        let parsed = AuthProvider::from_str(provider.as_str()).unwrap();
        assert_that!(parsed, eq(provider));
    }
}

#[test]
fn given_unknown_provider_string_when_parsed_then_invalid_auth_provider() {
    let result = AuthProvider::from_str("google");

    assert!(matches!(
        result,
        Err(CoreError::InvalidAuthProvider { ref value, .. }) if value == "google"
    ));
}

#[test]
fn given_provider_when_displayed_then_uses_storage_form() {
    assert_that!(AuthProvider::OAuth.to_string(), eq("oauth"));
}
