use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::checker::{ConnectionChecker, ConnectionStatus, ConnectionStatusView};
use super::directory::ProviderId;
use crate::error::AppError;

pub const CHECK_CONNECTION_PATH: &str = "/api/test-cloud/check-connection";
pub const PROVIDER_STATUS_PATH: &str = "/api/cloud-storage/:provider/status";

/// Body of the check-connection endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConnectionResponse {
    pub connected: bool,
}

pub fn cloud_storage_router(checker: Arc<ConnectionChecker>) -> Router {
    Router::new()
        .route(CHECK_CONNECTION_PATH, get(check_connection_handler))
        .route(PROVIDER_STATUS_PATH, get(provider_status_handler))
        .with_state(checker)
}

/// Always answers 200. A failed lookup reads as `connected: false`.
pub(crate) async fn check_connection_handler(
    State(checker): State<Arc<ConnectionChecker>>,
) -> Json<CheckConnectionResponse> {
    let status = checker.check().await;
    Json(CheckConnectionResponse {
        connected: status.is_connected(),
    })
}

pub(crate) async fn provider_status_handler(
    State(checker): State<Arc<ConnectionChecker>>,
    Path(provider): Path<String>,
) -> Result<Response, AppError> {
    let provider = ProviderId::parse(&provider)?;
    let status = checker.check_provider(&provider).await;

    let code = match status {
        ConnectionStatus::CheckFailed { .. } => StatusCode::SERVICE_UNAVAILABLE,
        ConnectionStatus::Connected | ConnectionStatus::NotConnected => StatusCode::OK,
    };

    let view = ConnectionStatusView::new(provider, &status, Utc::now());
    Ok((code, Json(view)).into_response())
}
