use axum::{http::StatusCode, response::IntoResponse};
use exercise_api::error::AppError;
use exercise_api::models::{MalformedId, ValidationError};
use http_body_util::BodyExt;

#[test]
fn test_not_found_returns_404() {
    let response = AppError::NotFound.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_malformed_id_returns_400() {
    let error: AppError = MalformedId("abc".to_string()).into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_validation_returns_400() {
    let error: AppError = ValidationError::Missing { field: "movement" }.into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_bad_request_returns_400() {
    let error = AppError::BadRequest("Invalid input".to_string());
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_database_error_returns_500() {
    let error: AppError = rusqlite::Error::QueryReturnedNoRows.into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_internal_returns_500() {
    let error = AppError::Internal("Something went wrong".to_string());
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_not_found_has_empty_body() {
    let response = AppError::NotFound.into_response();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_internal_error_does_not_leak_details() {
    let response = AppError::Internal("disk on fire".to_string()).into_response();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, serde_json::json!({ "error": "internal error" }));
}
