use crate::{AuthError, SESSION_COOKIE, SessionData, SessionStore};

use googletest::assert_that;
use googletest::prelude::{contains_substring, eq, none, some};

const KEY: &str = "session-key-0123456789abcdef0123456";

fn store() -> SessionStore {
    SessionStore::init(KEY, false).unwrap()
}

/// Turn a `Set-Cookie` value into the matching `Cookie` request header
fn as_request_cookie(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().to_string()
}

#[test]
fn given_blank_key_when_init_then_missing_session_key() {
    // When
    let result = SessionStore::init("", true);

    // Then
    assert!(matches!(result, Err(AuthError::MissingSessionKey { .. })));
}

#[test]
fn given_saved_session_when_loaded_then_same_data() {
    // Given
    let store = store();
    let data = SessionData {
        oauth_state: Some("state-123".to_string()),
        state_created_at: Some(1_700_000_000),
        email: None,
    };

    // When
    let cookie = store.save(&data).unwrap();
    let loaded = store.load(Some(&as_request_cookie(&cookie)));

    // Then
    assert_that!(loaded, eq(&data));
}

#[test]
fn given_saved_session_when_inspected_then_cookie_attributes_set() {
    // Given
    let store = SessionStore::init(KEY, true).unwrap();

    // When
    let cookie = store.save(&SessionData::default()).unwrap();

    // Then
    assert!(cookie.starts_with(&format!("{SESSION_COOKIE}=")));
    assert_that!(cookie, contains_substring("Path=/"));
    assert_that!(cookie, contains_substring("HttpOnly"));
    assert_that!(cookie, contains_substring("Max-Age=604800"));
    assert_that!(cookie, contains_substring("SameSite=Lax"));
    assert_that!(cookie, contains_substring("Secure"));
}

#[test]
fn given_plaintext_email_when_saved_then_not_readable_in_cookie() {
    // Given
    let store = store();
    let data = SessionData {
        email: Some("ada@example.com".to_string()),
        ..SessionData::default()
    };

    // When
    let cookie = store.save(&data).unwrap();

    // Then
    assert!(!cookie.contains("ada@example.com"));
}

#[test]
fn given_cookie_from_other_key_when_loaded_then_empty() {
    // Given
    let other = SessionStore::init("a-completely-different-session-key!!", false).unwrap();
    let data = SessionData {
        email: Some("ada@example.com".to_string()),
        ..SessionData::default()
    };
    let cookie = other.save(&data).unwrap();

    // When
    let loaded = store().load(Some(&as_request_cookie(&cookie)));

    // Then
    assert_that!(loaded.email.as_deref(), none());
}

#[test]
fn given_tampered_cookie_when_loaded_then_empty() {
    // Given
    let store = store();
    let cookie = as_request_cookie(
        &store
            .save(&SessionData {
                email: Some("ada@example.com".to_string()),
                ..SessionData::default()
            })
            .unwrap(),
    );
    let mut tampered = cookie.into_bytes();
    let last = tampered.len() - 1;
    tampered[last] = if tampered[last] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap();

    // When
    let loaded = store.load(Some(&tampered));

    // Then
    assert_that!(loaded, eq(&SessionData::default()));
}

#[test]
fn given_missing_or_unrelated_cookie_when_loaded_then_empty() {
    // Given
    let store = store();

    // When
    let absent = store.load(None);
    let unrelated = store.load(Some("theme=dark; jwt=abc"));

    // Then
    assert_that!(absent, eq(&SessionData::default()));
    assert_that!(unrelated, eq(&SessionData::default()));
}

#[test]
fn given_session_among_other_cookies_when_loaded_then_found() {
    // Given
    let store = store();
    let data = SessionData {
        email: Some("ada@example.com".to_string()),
        ..SessionData::default()
    };
    let session = as_request_cookie(&store.save(&data).unwrap());

    // When
    let loaded = store.load(Some(&format!("theme=dark; {session}; jwt=abc")));

    // Then
    assert_that!(loaded.email.as_deref(), some(eq("ada@example.com")));
}

#[test]
fn given_store_when_cleared_then_cookie_expires_immediately() {
    // When
    let cookie = store().clear();

    // Then
    assert!(cookie.starts_with("session=;"));
    assert_that!(cookie, contains_substring("Max-Age=0"));
}
