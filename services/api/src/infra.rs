use async_trait::async_trait;
use launchpad::cloud_storage::{
    CloudStorageError, ConnectionChecker, ConnectionDirectory, ConnectionRecord, ProviderId,
    RestConnectionDirectory,
};
use launchpad::config::{CloudStorageConfig, ConnectionBackend};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Connections fixed at startup, for environments without a backend.
#[derive(Debug, Default, Clone)]
pub(crate) struct StaticConnectionDirectory {
    records: Arc<BTreeMap<ProviderId, ConnectionRecord>>,
}

impl StaticConnectionDirectory {
    pub(crate) fn from_seeds(seeds: &BTreeMap<ProviderId, String>) -> Self {
        let records: BTreeMap<_, _> = seeds
            .iter()
            .map(|(provider, id)| {
                let record = ConnectionRecord::new(id.clone())
                    .with_attribute("provider", provider.as_str());
                (provider.clone(), record)
            })
            .collect();
        Self {
            records: Arc::new(records),
        }
    }
}

#[async_trait]
impl ConnectionDirectory for StaticConnectionDirectory {
    async fn system_connection(
        &self,
        provider: &ProviderId,
    ) -> Result<Option<ConnectionRecord>, CloudStorageError> {
        Ok(self.records.get(provider).cloned())
    }
}

pub(crate) fn connection_directory(config: &CloudStorageConfig) -> Arc<dyn ConnectionDirectory> {
    match &config.backend {
        ConnectionBackend::Static { connections } => {
            Arc::new(StaticConnectionDirectory::from_seeds(connections))
        }
        ConnectionBackend::Rest {
            base_url,
            service_key,
        } => Arc::new(RestConnectionDirectory::new(
            base_url.clone(),
            service_key.clone(),
        )),
    }
}

pub(crate) fn connection_checker(config: &CloudStorageConfig) -> ConnectionChecker {
    ConnectionChecker::new(connection_directory(config), config.provider.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(raw: &str) -> ProviderId {
        ProviderId::parse(raw).expect("valid provider")
    }

    #[tokio::test]
    async fn static_directory_serves_seeded_connections() {
        let mut seeds = BTreeMap::new();
        seeds.insert(provider("dropbox"), "conn-1".to_string());
        let directory = StaticConnectionDirectory::from_seeds(&seeds);

        let record = directory
            .system_connection(&provider("dropbox"))
            .await
            .expect("lookup succeeds")
            .expect("record present");
        assert_eq!(record.id(), Some(&serde_json::json!("conn-1")));
        assert_eq!(
            record.fields.get("provider"),
            Some(&serde_json::json!("dropbox"))
        );

        let missing = directory
            .system_connection(&provider("box"))
            .await
            .expect("lookup succeeds");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn checker_uses_configured_provider() {
        let mut connections = BTreeMap::new();
        connections.insert(provider("box"), "conn-9".to_string());
        let config = CloudStorageConfig {
            provider: provider("box"),
            backend: ConnectionBackend::Static { connections },
        };

        let checker = connection_checker(&config);
        assert_eq!(checker.default_provider().as_str(), "box");
        assert!(checker.check().await.is_connected());
    }
}
