use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use launchpad::auth::{with_auth_gate, AuthGate, RoutePattern};
use launchpad::cloud_storage::{
    cloud_storage_router, CheckConnectionResponse, CloudStorageError, ConnectionChecker,
    ConnectionDirectory, ConnectionRecord, ProviderId,
};
use launchpad::config::AuthConfig;
use tower::ServiceExt;

#[derive(Default)]
struct MemoryDirectory {
    records: HashMap<String, ConnectionRecord>,
}

impl MemoryDirectory {
    fn with(provider: &str, id: &str) -> Self {
        let mut records = HashMap::new();
        records.insert(provider.to_string(), ConnectionRecord::new(id));
        Self { records }
    }
}

#[async_trait]
impl ConnectionDirectory for MemoryDirectory {
    async fn system_connection(
        &self,
        provider: &ProviderId,
    ) -> Result<Option<ConnectionRecord>, CloudStorageError> {
        Ok(self.records.get(provider.as_str()).cloned())
    }
}

fn checker(directory: MemoryDirectory) -> Arc<ConnectionChecker> {
    let provider = ProviderId::parse("dropbox").expect("valid provider");
    Arc::new(ConnectionChecker::new(Arc::new(directory), provider))
}

async fn check(router: axum::Router, cookie: Option<&'static str>) -> axum::response::Response {
    let mut request = Request::get("/api/test-cloud/check-connection");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    router
        .oneshot(request.body(Body::empty()).expect("request builds"))
        .await
        .expect("route executes")
}

async fn connected(response: axum::response::Response) -> bool {
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    let payload: CheckConnectionResponse = serde_json::from_slice(&body).expect("json payload");
    payload.connected
}

#[tokio::test]
async fn default_gate_serves_connection_status_untouched() {
    let router = with_auth_gate(
        cloud_storage_router(checker(MemoryDirectory::with("dropbox", "conn-1"))),
        Arc::new(AuthGate::passthrough()),
    );

    let response = check(router, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(connected(response).await);
}

#[tokio::test]
async fn other_providers_do_not_count_as_connected() {
    let router = with_auth_gate(
        cloud_storage_router(checker(MemoryDirectory::with("google_drive", "conn-2"))),
        Arc::new(AuthGate::passthrough()),
    );

    let response = check(router, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!connected(response).await);
}

#[tokio::test]
async fn protected_api_requires_session_when_enabled() {
    let config = AuthConfig {
        enabled: true,
        protected_routes: vec![RoutePattern::parse("/api/:rest*").expect("valid pattern")],
        login_path: "/auth/sign-in".to_string(),
        ..AuthConfig::default()
    };
    let gate = Arc::new(AuthGate::from_config(config));
    let router = with_auth_gate(
        cloud_storage_router(checker(MemoryDirectory::default())),
        gate,
    );

    let redirected = check(router.clone(), None).await;
    assert_eq!(redirected.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        redirected
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/auth/sign-in")
    );

    let served = check(router, Some("sb-access-token=eyJhbGci")).await;
    assert_eq!(served.status(), StatusCode::OK);
    assert!(!connected(served).await);
}
