use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a storage integration such as `dropbox`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProviderId(String);

impl ProviderId {
    pub const MAX_LEN: usize = 64;

    pub fn parse(raw: &str) -> Result<Self, InvalidProviderId> {
        let valid = !raw.is_empty()
            && raw.len() <= Self::MAX_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_');

        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidProviderId {
                value: raw.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "invalid cloud storage provider '{value}': expected 1-64 lowercase letters, digits, '-' or '_'"
)]
pub struct InvalidProviderId {
    pub value: String,
}

/// A linked storage integration, carried as the backend returned it. Any row
/// counts as a connection whatever its fields hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionRecord {
    pub fields: Map<String, Value>,
}

impl ConnectionRecord {
    pub fn new(id: impl Into<Value>) -> Self {
        Self::default().with_attribute("id", id)
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> Option<&Value> {
        self.fields.get("id")
    }
}

/// Lookup of application-wide storage connections, backed by the platform's
/// backend service or an in-memory table.
#[async_trait]
pub trait ConnectionDirectory: Send + Sync {
    async fn system_connection(
        &self,
        provider: &ProviderId,
    ) -> Result<Option<ConnectionRecord>, CloudStorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CloudStorageError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend rejected the service key")]
    Unauthorized,

    #[error("backend error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("connection directory unavailable: {0}")]
    Unavailable(String),
}
