//! Connection lookups against the backend-as-a-service REST API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::directory::{CloudStorageError, ConnectionDirectory, ConnectionRecord, ProviderId};

/// Reads the `cloud_storage_connections` table. System connections are rows
/// without an owning user.
pub struct RestConnectionDirectory {
    http: Client,
    base_url: String,
    service_key: String,
}

impl RestConnectionDirectory {
    pub const TABLE_PATH: &'static str = "/rest/v1/cloud_storage_connections";

    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}{}", self.base_url, Self::TABLE_PATH)
    }
}

#[async_trait]
impl ConnectionDirectory for RestConnectionDirectory {
    async fn system_connection(
        &self,
        provider: &ProviderId,
    ) -> Result<Option<ConnectionRecord>, CloudStorageError> {
        let provider_filter = format!("eq.{provider}");
        let response = self
            .http
            .get(self.table_url())
            .query(&[
                ("provider", provider_filter.as_str()),
                ("user_id", "is.null"),
                ("select", "*"),
                ("limit", "1"),
            ])
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CloudStorageError::Unauthorized);
        }
        if !status.is_success() {
            let message = response.text().await?;
            return Err(CloudStorageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let rows: Vec<ConnectionRecord> = response
            .json()
            .await
            .map_err(|e| CloudStorageError::Deserialization(e.to_string()))?;

        Ok(rows.into_iter().next())
    }
}
