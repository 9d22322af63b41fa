//! Tests for the `AppError` to HTTP response mapping.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;

use dlm_api::error::AppError;
use dlm_core::error::CoreError;
use dlm_core::ports::RepositoryError;

async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_not_found_maps_to_404() {
    let (status, json) = render(AppError::Core(CoreError::NotFound {
        entity: "Download",
        id: 7,
    }))
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Download with id 7 not found");
}

#[tokio::test]
async fn test_conflict_maps_to_400() {
    let (status, json) = render(CoreError::Conflict("taken".into()).into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "taken");
}

#[tokio::test]
async fn test_validation_maps_to_400() {
    let (status, json) = render(CoreError::Validation("url: invalid".into()).into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unauthorized_and_forbidden() {
    let (status, json) = render(CoreError::Unauthorized("who are you".into()).into()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let (status, json) = render(CoreError::Forbidden("not you".into()).into()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_bad_request_maps_to_400() {
    let (status, json) = render(AppError::BadRequest("malformed".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "malformed");
}

#[tokio::test]
async fn test_internal_message_is_passed_through() {
    let (status, json) = render(AppError::InternalError("db down".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "db down");

    let (status, json) = render(CoreError::Internal("boom".into()).into()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "boom");
}

#[tokio::test]
async fn test_repository_errors() {
    let (status, _) = render(
        RepositoryError::NotFound {
            entity: "Download",
            id: 3,
        }
        .into(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // After a successful lookup even a missing row is a server fault.
    let (status, json) = render(AppError::persistence(RepositoryError::NotFound {
        entity: "DownloadVersion",
        id: 9,
    }))
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "DownloadVersion with id 9 not found");
}

#[test]
fn test_repository_error_conversion() {
    assert_matches!(
        AppError::from(RepositoryError::Storage("timeout".into())),
        AppError::Core(CoreError::Internal(msg)) if msg == "timeout"
    );
    assert_matches!(
        AppError::from(RepositoryError::Duplicate { entity: "Download", field: "title" }),
        AppError::Core(CoreError::Conflict(_))
    );
    assert_matches!(
        AppError::from(RepositoryError::NotFound { entity: "Download", id: 1 }),
        AppError::Core(CoreError::NotFound { id: 1, .. })
    );
}
