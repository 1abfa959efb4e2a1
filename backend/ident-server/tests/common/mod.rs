#![allow(dead_code)]

//! Test infrastructure for ident-server API tests

use ident_config::Config;
use ident_server::{AppState, IdentityProvider, OAuthError, ProviderAssertion};

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-that-is-at-least-32-bytes";
pub const TEST_SESSION_KEY: &str = "test-session-key-that-is-at-least-32-bytes";
pub const PROVIDER_AUTH_URL: &str = "https://provider.test/authorize";
pub const HOME_URL: &str = "http://localhost:3000/home";
pub const LOGIN_URL: &str = "http://localhost:3000/login";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    ident_db::migrate(&pool)
        .await
        .expect("Failed to apply schema");

    pool
}

/// Config with every secret set and the cheapest bcrypt cost
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.jwt_secret = Some(TEST_JWT_SECRET.to_string());
    config.auth.bcrypt_cost = 4;
    config.session.key = Some(TEST_SESSION_KEY.to_string());
    config.oauth.client_id = Some("client-id".to_string());
    config.oauth.client_secret = Some("client-secret".to_string());
    config.oauth.callback_url = Some("http://localhost:8080/auth/google/callback".to_string());
    config.frontend.base_url = "http://localhost:3000".to_string();
    config.frontend.login_url = LOGIN_URL.to_string();
    config
}

/// Provider that hands back whatever assertion the test configured
pub struct FakeProvider {
    assertion: Mutex<Option<ProviderAssertion>>,
    codes: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn asserting(subject: &str, email: Option<&str>, name: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            assertion: Mutex::new(Some(ProviderAssertion {
                subject: subject.to_string(),
                email: email.map(str::to_string),
                name: name.map(str::to_string),
            })),
            codes: Mutex::new(Vec::new()),
        })
    }

    /// Provider whose code exchange fails
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            assertion: Mutex::new(None),
            codes: Mutex::new(Vec::new()),
        })
    }

    /// Change what the next exchange asserts, as a provider account would over time
    pub fn assert_next(&self, subject: &str, email: Option<&str>, name: Option<&str>) {
        *self.assertion.lock().unwrap() = Some(ProviderAssertion {
            subject: subject.to_string(),
            email: email.map(str::to_string),
            name: name.map(str::to_string),
        });
    }

    pub fn exchanged_codes(&self) -> Vec<String> {
        self.codes.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    fn name(&self) -> &str {
        "google"
    }

    fn authorization_url(&self, state: &str) -> String {
        format!("{PROVIDER_AUTH_URL}?state={state}")
    }

    async fn exchange(&self, code: &str) -> Result<ProviderAssertion, OAuthError> {
        self.codes.lock().unwrap().push(code.to_string());
        self.assertion
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| OAuthError::provider("token endpoint returned 500"))
    }
}

pub async fn create_test_app_state(provider: Arc<FakeProvider>) -> AppState {
    let pool = create_test_pool().await;
    AppState::with_provider(&test_config(), pool, provider).expect("Failed to build app state")
}

/// All `Set-Cookie` values on a response
pub fn set_cookies<B>(response: &Response<B>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// The `name=value` pair of the named cookie, ready for a `Cookie` header
pub fn cookie_pair(set_cookies: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    set_cookies
        .iter()
        .find(|c| c.starts_with(&prefix))
        .and_then(|c| c.split(';').next())
        .map(str::to_string)
}

pub fn location<B>(response: &Response<B>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}
