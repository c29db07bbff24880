use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error};

use super::directory::{ConnectionDirectory, ProviderId};

/// Outcome of a single connection lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    NotConnected,
    CheckFailed { reason: String },
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::NotConnected => "not_connected",
            Self::CheckFailed { .. } => "check_failed",
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::CheckFailed { reason } => Some(reason),
            Self::Connected | Self::NotConnected => None,
        }
    }
}

/// Serializable report of a check, shared by the HTTP route and the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionStatusView {
    pub provider: ProviderId,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl ConnectionStatusView {
    pub fn new(provider: ProviderId, status: &ConnectionStatus, checked_at: DateTime<Utc>) -> Self {
        Self {
            provider,
            status: status.label(),
            reason: status.reason().map(str::to_string),
            checked_at,
        }
    }
}

/// Classifies directory lookups. Every call hits the directory; nothing is
/// cached or retried.
#[derive(Clone)]
pub struct ConnectionChecker {
    directory: Arc<dyn ConnectionDirectory>,
    default_provider: ProviderId,
}

impl ConnectionChecker {
    pub fn new(directory: Arc<dyn ConnectionDirectory>, default_provider: ProviderId) -> Self {
        Self {
            directory,
            default_provider,
        }
    }

    pub fn default_provider(&self) -> &ProviderId {
        &self.default_provider
    }

    pub async fn check(&self) -> ConnectionStatus {
        self.check_provider(&self.default_provider).await
    }

    pub async fn check_provider(&self, provider: &ProviderId) -> ConnectionStatus {
        match self.directory.system_connection(provider).await {
            Ok(Some(record)) => {
                debug!(
                    %provider,
                    connection_id = ?record.id(),
                    "system cloud storage connection found"
                );
                ConnectionStatus::Connected
            }
            Ok(None) => ConnectionStatus::NotConnected,
            Err(err) => {
                error!(%provider, error = %err, "failed to check system cloud storage connection");
                ConnectionStatus::CheckFailed {
                    reason: err.to_string(),
                }
            }
        }
    }
}
