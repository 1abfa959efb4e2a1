use crate::api::{local::local, oauth::oauth, ping, protected};
use crate::app_state::AppState;
use crate::health;
use crate::middleware::{panic_boundary, require_auth};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/protected", get(protected::protected))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        // Provider login
        .route("/auth/{provider}", get(oauth::begin_auth))
        .route("/auth/{provider}/callback", get(oauth::complete_auth))
        .route("/auth/status", get(oauth::auth_status))
        .route("/auth/logout", post(oauth::logout))
        // Local login
        .route("/login", post(local::login))
        .route("/signup", post(local::signup))
        // Health check endpoints
        .route("/ping", get(ping::ping))
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .merge(protected_routes)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        // Outermost: catches panics from every layer above
        .layer(middleware::from_fn(panic_boundary))
}
