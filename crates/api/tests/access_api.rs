//! Access-control tests: who may read and who may write.

mod common;

use axum::http::StatusCode;
use common::{body_json, ns, versions_path, TestApp};
use dlm_core::models::download::DownloadFilter;

// ---------------------------------------------------------------------------
// Anonymous callers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_anonymous_list_returns_401() {
    let app = TestApp::new();

    let response = app.get(&ns("/downloads"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "You cannot view the download resource.");
}

#[tokio::test]
async fn test_anonymous_create_returns_401_and_persists_nothing() {
    let app = TestApp::new();

    let response = app
        .post_json(&ns("/downloads"), None, serde_json::json!({ "title": "Sneaky" }))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let stored = app.repos.downloads.list(&DownloadFilter::default()).await.unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_anonymous_version_list_returns_401() {
    let app = TestApp::new();
    let id = app.create_download("Hidden").await["id"].as_i64().unwrap();

    let response = app.get(&versions_path(id), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_is_treated_as_anonymous() {
    let app = TestApp::new();

    let response = app.get(&ns("/downloads"), Some("not-a-jwt")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Authenticated callers without the right role
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_user_without_roles_cannot_read() {
    let app = TestApp::new();
    let token = app.token(30, &[]);

    let response = app.get(&ns("/downloads"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_unknown_role_cannot_read() {
    let app = TestApp::new();
    let token = app.token(31, &["shop_manager"]);

    let response = app.get(&ns("/downloads"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_read_roles_can_list() {
    let app = TestApp::new();

    for role in ["administrator", "editor", "author", "contributor", "subscriber"] {
        let token = app.token(40, &[role]);
        let response = app.get(&ns("/downloads"), Some(&token)).await;
        assert_eq!(response.status(), StatusCode::OK, "{role} should be able to read");
    }
}

#[tokio::test]
async fn test_subscriber_create_returns_403_and_persists_nothing() {
    let app = TestApp::new();

    let response = app
        .post_json(
            &ns("/downloads"),
            Some(&app.subscriber()),
            serde_json::json!({ "title": "Nope" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "You do not have the required authorization to create or edit items."
    );

    let stored = app.repos.downloads.list(&DownloadFilter::default()).await.unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_author_cannot_create_version() {
    let app = TestApp::new();
    let id = app.create_download("Guarded").await["id"].as_i64().unwrap();
    let token = app.token(50, &["author"]);

    let response = app
        .post_json(
            &versions_path(id),
            Some(&token),
            serde_json::json!({ "version": "1.0", "url": "https://example.com/f.zip" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    assert!(app.repos.versions.list_by_download(id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_subscriber_can_list_versions() {
    let app = TestApp::new();
    let id = app.create_download("Open").await["id"].as_i64().unwrap();
    app.create_version(id, "1.0", "https://example.com/f.zip").await;

    let response = app.get(&versions_path(id), Some(&app.subscriber())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_anonymous_version_create_returns_401_and_leaves_ranks() {
    let app = TestApp::new();
    let id = app.create_download("Locked").await["id"].as_i64().unwrap();
    app.create_version(id, "1.0", "https://example.com/1.zip").await;
    app.create_version(id, "1.1", "https://example.com/2.zip").await;

    let response = app
        .post_json(
            &versions_path(id),
            None,
            serde_json::json!({ "version": "2.0", "url": "https://example.com/3.zip" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let stored = app.repos.versions.list_by_download(id).await.unwrap();
    let ranks: Vec<(&str, i32)> = stored
        .iter()
        .map(|v| (v.version.as_str(), v.menu_order))
        .collect();
    assert_eq!(ranks, [("1.1", 0), ("1.0", 1)]);
}

#[tokio::test]
async fn test_user_without_roles_cannot_list_versions() {
    let app = TestApp::new();
    let id = app.create_download("Members Only").await["id"].as_i64().unwrap();
    let token = app.token(32, &[]);

    let response = app.get(&versions_path(id), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
    assert_eq!(json["error"], "You cannot view the download resource.");
}
