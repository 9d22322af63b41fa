#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use dlm_api::auth::jwt::{generate_access_token, JwtConfig};
use dlm_api::bootstrap::in_memory_repos;
use dlm_api::config::{ServerConfig, DEFAULT_NAMESPACE};
use dlm_api::router::build_app_router;
use dlm_api::state::AppState;
use dlm_core::ports::Repos;
use dlm_db::links::DownloadLinks;

pub const SITE_URL: &str = "https://downloads.example.com";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        namespace: DEFAULT_NAMESPACE.to_string(),
        site_url: SITE_URL.to_string(),
        version_cache_ttl_secs: 3600,
        database_url: None,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
        },
    }
}

/// An app wired to a fresh in-memory store, plus direct access to that
/// store so tests can seed and inspect it.
pub struct TestApp {
    pub router: Router,
    pub repos: Repos,
    pub config: ServerConfig,
}

impl TestApp {
    pub fn new() -> Self {
        let repos = in_memory_repos(DownloadLinks::new(SITE_URL), Duration::from_secs(3600));
        Self::with_repos(repos)
    }

    /// Build the app around caller-supplied repositories (e.g. failing fakes).
    pub fn with_repos(repos: Repos) -> Self {
        let config = test_config();
        let state = AppState {
            repos: repos.clone(),
            config: Arc::new(config.clone()),
        };
        let router = build_app_router(state, &config);
        Self {
            router,
            repos,
            config,
        }
    }

    /// A signed bearer token for `user_id` holding `roles`.
    pub fn token(&self, user_id: i64, roles: &[&str]) -> String {
        generate_access_token(user_id, roles, &self.config.jwt).expect("token should sign")
    }

    pub fn editor(&self) -> String {
        self.token(10, &["editor"])
    }

    pub fn subscriber(&self) -> String {
        self.token(20, &["subscriber"])
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Response<Body> {
        self.send(Method::GET, path, token, None).await
    }

    pub async fn post_json(
        &self,
        path: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> Response<Body> {
        self.send(Method::POST, path, token, Some(body)).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Create a download through the API as an editor and return its JSON.
    pub async fn create_download(&self, title: &str) -> serde_json::Value {
        let response = self
            .post_json(
                &ns("/downloads"),
                Some(&self.editor()),
                serde_json::json!({ "title": title }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    /// Create a version through the API as an editor and return its JSON.
    pub async fn create_version(
        &self,
        download_id: i64,
        version: &str,
        url: &str,
    ) -> serde_json::Value {
        let response = self
            .post_json(
                &versions_path(download_id),
                Some(&self.editor()),
                serde_json::json!({ "version": version, "url": url }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }
}

/// Prefix `path` with the default namespace.
pub fn ns(path: &str) -> String {
    format!("{DEFAULT_NAMESPACE}{path}")
}

pub fn versions_path(download_id: i64) -> String {
    ns(&format!("/downloads/{download_id}/versions"))
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
