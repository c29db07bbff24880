use crate::cli::ServeArgs;
use crate::infra::{connection_checker, AppState};
use crate::routes::build_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use launchpad::auth::AuthGate;
use launchpad::config::AppConfig;
use launchpad::error::AppError;
use launchpad::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let checker = Arc::new(connection_checker(&config.cloud_storage));
    let gate = Arc::new(AuthGate::from_config(config.auth.clone()));

    let app = build_router(checker, gate)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| AppError::Bind { addr, source })?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        provider = %config.cloud_storage.provider,
        auth_gate = config.auth.enabled,
        "launchpad api ready"
    );

    axum::serve(listener, app).await.map_err(AppError::Serve)?;
    Ok(())
}
