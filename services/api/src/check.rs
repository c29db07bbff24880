use chrono::Utc;
use clap::Args;
use launchpad::cloud_storage::{ConnectionChecker, ConnectionStatusView, ProviderId};
use launchpad::config::AppConfig;
use launchpad::error::AppError;
use launchpad::telemetry;

use crate::infra::connection_checker;

#[derive(Args, Debug, Default)]
pub(crate) struct CheckConnectionArgs {
    /// Provider to look up instead of the configured one
    #[arg(long)]
    pub(crate) provider: Option<String>,
}

/// Prints the tagged status as JSON. A failed lookup is reported, not returned
/// as an error.
pub(crate) async fn run_check_connection(args: CheckConnectionArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let checker = connection_checker(&config.cloud_storage);
    let provider = resolve_provider(&checker, args.provider.as_deref())?;

    let status = checker.check_provider(&provider).await;
    let view = ConnectionStatusView::new(provider, &status, Utc::now());
    println!("{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}

fn resolve_provider(
    checker: &ConnectionChecker,
    raw: Option<&str>,
) -> Result<ProviderId, AppError> {
    match raw {
        Some(raw) => Ok(ProviderId::parse(raw.trim())?),
        None => Ok(checker.default_provider().clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad::config::{CloudStorageConfig, ConnectionBackend};
    use std::collections::BTreeMap;

    fn checker() -> ConnectionChecker {
        let config = CloudStorageConfig {
            provider: ProviderId::parse("dropbox").expect("valid provider"),
            backend: ConnectionBackend::Static {
                connections: BTreeMap::new(),
            },
        };
        connection_checker(&config)
    }

    #[test]
    fn falls_back_to_configured_provider() {
        let provider = resolve_provider(&checker(), None).expect("default provider");
        assert_eq!(provider.as_str(), "dropbox");
    }

    #[test]
    fn trims_explicit_provider() {
        let provider =
            resolve_provider(&checker(), Some(" google_drive ")).expect("valid provider");
        assert_eq!(provider.as_str(), "google_drive");
    }

    #[test]
    fn invalid_provider_is_an_error_before_any_lookup() {
        let err = resolve_provider(&checker(), Some("Google Drive")).expect_err("rejected");
        assert!(matches!(err, AppError::InvalidProvider(_)));
    }
}
