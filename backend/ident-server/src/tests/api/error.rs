use crate::ApiError;
use crate::api::error::{INTERNAL_MESSAGE, INVALID_CREDENTIALS_MESSAGE, UNAUTHORIZED_MESSAGE};
use crate::oauth::OAuthError;

use ident_auth::AuthError;
use ident_core::validate_email;
use ident_db::DbError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use googletest::assert_that;
use googletest::prelude::{eq, none};
use http::StatusCode;
use http_body_util::BodyExt;
use serde_json::Value;

async fn body_json(error: ApiError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_validation_error_when_rendered_then_400_with_field() {
    // Given
    let error = ApiError::Validation {
        message: "email is required".into(),
        field: Some("email".into()),
        location: ErrorLocation::from(Location::caller()),
    };

    // When
    let (status, json) = body_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_that!(json["error"].as_str(), eq(Some("email is required")));
    assert_that!(json["field"].as_str(), eq(Some("email")));
}

#[tokio::test]
async fn given_unauthorized_when_rendered_then_401_with_fixed_message() {
    // When
    let (status, json) = body_json(ApiError::unauthorized()).await;

    // Then
    assert_that!(status, eq(StatusCode::UNAUTHORIZED));
    assert_that!(json["error"].as_str(), eq(Some(UNAUTHORIZED_MESSAGE)));
    assert_that!(json.get("field"), none());
}

#[tokio::test]
async fn given_invalid_credentials_when_rendered_then_401_without_detail() {
    // Given
    let error: ApiError = AuthError::invalid_credentials().into();

    // When
    let (status, json) = body_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::UNAUTHORIZED));
    assert_that!(json["error"].as_str(), eq(Some(INVALID_CREDENTIALS_MESSAGE)));
}

#[tokio::test]
async fn given_internal_error_when_rendered_then_detail_is_not_leaked() {
    // Given
    let error = ApiError::internal("panic in GET /secret: index out of bounds");

    // When
    let (status, json) = body_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::INTERNAL_SERVER_ERROR));
    assert_that!(json["error"].as_str(), eq(Some(INTERNAL_MESSAGE)));
}

#[tokio::test]
async fn given_store_timeout_when_converted_then_500_without_detail() {
    // Given
    let error: ApiError = DbError::Timeout {
        operation: "find_by_email",
        after: std::time::Duration::from_secs(5),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();

    // When
    let (status, json) = body_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::INTERNAL_SERVER_ERROR));
    assert_that!(json["error"].as_str(), eq(Some(INTERNAL_MESSAGE)));
}

#[test]
fn given_store_conflict_when_converted_then_409() {
    // Given
    let error: ApiError = DbError::Conflict {
        field: "email",
        location: ErrorLocation::from(Location::caller()),
    }
    .into();

    // Then
    assert_that!(error.status(), eq(StatusCode::CONFLICT));
}

#[test]
fn given_core_validation_error_when_converted_then_field_is_kept() {
    // Given
    let core = validate_email("not-an-email").unwrap_err();

    // When
    let error: ApiError = core.into();

    // Then
    match error {
        ApiError::Validation { field, .. } => {
            assert_that!(field.as_deref(), eq(Some("email")));
        }
        other => panic!("Expected Validation, got {:?}", other),
    }
}

#[test]
fn given_oauth_errors_when_converted_then_statuses_match_failure_kind() {
    let cases = [
        (
            OAuthError::unknown_provider("github"),
            StatusCode::NOT_FOUND,
        ),
        (
            OAuthError::provider_denied("access_denied"),
            StatusCode::BAD_REQUEST,
        ),
        (
            OAuthError::invalid_state("state mismatch"),
            StatusCode::BAD_REQUEST,
        ),
        (OAuthError::missing_code(), StatusCode::BAD_REQUEST),
        (OAuthError::missing_email(), StatusCode::BAD_REQUEST),
        (
            OAuthError::account_conflict("ada@example.com"),
            StatusCode::CONFLICT,
        ),
        (
            OAuthError::identity_unresolved("ada@example.com"),
            StatusCode::CONFLICT,
        ),
        (
            OAuthError::provider("token endpoint returned 500"),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (oauth, expected) in cases {
        let error: ApiError = oauth.into();
        assert_that!(error.status(), eq(expected));
    }
}

#[test]
fn given_oauth_error_constructor_when_called_then_location_is_the_call_site() {
    // When
    let expected_line = line!() + 1;
    let error = OAuthError::missing_email();

    // Then
    match error {
        OAuthError::MissingEmail { location } => {
            assert_that!(location.file, eq(file!()));
            assert_that!(location.line, eq(expected_line));
        }
        other => panic!("Expected MissingEmail, got {:?}", other),
    }
}

#[test]
fn given_store_error_when_propagated_with_question_mark_then_location_is_the_propagation_site() {
    // Given
    fn lookup() -> crate::oauth::Result<()> {
        let failed: Result<(), DbError> = Err(DbError::Conflict {
            field: "email",
            location: ErrorLocation::from(Location::caller()),
        });
        failed?;
        Ok(())
    }

    // When
    let error = lookup().unwrap_err();

    // Then
    match error {
        OAuthError::Store { source, location } => {
            assert!(source.is_conflict());
            assert_that!(location.file, eq(file!()));
        }
        other => panic!("Expected Store, got {:?}", other),
    }
    assert!(std::error::Error::source(&lookup().unwrap_err()).is_some());
}
