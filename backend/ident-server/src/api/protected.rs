use crate::api::extractors::auth_claims::AuthClaims;

use axum::Json;
use serde_json::{Value, json};

/// GET /api/protected - echoes the verified claims
pub async fn protected(AuthClaims(claims): AuthClaims) -> Json<Value> {
    Json(json!({
        "message": "You are authorized",
        "claims": claims,
    }))
}
