use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tracing::{debug, error, info};

use super::session::{CookieSessionVerifier, SessionVerifier};
use crate::config::AuthConfig;

/// Session gate state: which paths are protected and how sessions are checked.
#[derive(Clone)]
pub struct AuthGate {
    config: AuthConfig,
    verifier: Arc<dyn SessionVerifier>,
}

impl AuthGate {
    pub fn new(config: AuthConfig, verifier: Arc<dyn SessionVerifier>) -> Self {
        Self { config, verifier }
    }

    pub fn from_config(config: AuthConfig) -> Self {
        let verifier = Arc::new(CookieSessionVerifier::new(config.session_cookie.clone()));
        Self::new(config, verifier)
    }

    /// Gate that forwards everything.
    pub fn passthrough() -> Self {
        Self::from_config(AuthConfig::default())
    }

    pub fn intercepts(&self, path: &str) -> bool {
        self.config.enabled
            && self
                .config
                .protected_routes
                .iter()
                .any(|pattern| pattern.matches(path))
    }
}

pub async fn session_gate(
    State(gate): State<Arc<AuthGate>>,
    request: Request,
    next: Next,
) -> Response {
    if !gate.intercepts(request.uri().path()) {
        return next.run(request).await;
    }

    if gate.verifier.has_session(request.headers()).await {
        debug!(path = %request.uri().path(), "session present");
        return next.run(request).await;
    }

    info!(
        path = %request.uri().path(),
        login = %gate.config.login_path,
        "redirecting request without session"
    );
    login_redirect(&gate.config.login_path)
}

fn login_redirect(login_path: &str) -> Response {
    match HeaderValue::from_str(login_path) {
        Ok(location) => {
            (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response()
        }
        Err(err) => {
            error!(login = ?login_path, error = %err, "login path is not a valid Location header");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub fn with_auth_gate(router: Router, gate: Arc<AuthGate>) -> Router {
    router.layer(middleware::from_fn_with_state(gate, session_gate))
}
