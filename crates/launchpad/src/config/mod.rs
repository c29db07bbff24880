use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;

use crate::auth::{RoutePattern, RoutePatternError};
use crate::cloud_storage::{InvalidProviderId, ProviderId};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub auth: AuthConfig,
    pub cloud_storage: CloudStorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            auth: AuthConfig::from_env()?,
            cloud_storage: CloudStorageConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Session gate settings. Disabled with no protected routes by default, which
/// leaves every request untouched.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub enabled: bool,
    pub protected_routes: Vec<RoutePattern>,
    pub login_path: String,
    pub session_cookie: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            protected_routes: Vec::new(),
            login_path: "/login".to_string(),
            session_cookie: "sb-access-token".to_string(),
        }
    }
}

impl AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let enabled = match env::var("AUTH_GATE_ENABLED") {
            Ok(raw) => parse_flag("AUTH_GATE_ENABLED", &raw)?,
            Err(_) => defaults.enabled,
        };

        let protected_routes = match env::var("AUTH_PROTECTED_ROUTES") {
            Ok(raw) => parse_route_patterns(&raw)?,
            Err(_) => defaults.protected_routes,
        };

        let login_path = match env::var("AUTH_LOGIN_PATH") {
            Ok(raw) => parse_login_path(&raw)?,
            Err(_) => defaults.login_path,
        };

        Ok(Self {
            enabled,
            protected_routes,
            login_path,
            session_cookie: env::var("AUTH_SESSION_COOKIE").unwrap_or(defaults.session_cookie),
        })
    }
}

/// Where system connection records are looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionBackend {
    /// Fixed provider to connection id pairs, used when no backend is configured.
    Static {
        connections: BTreeMap<ProviderId, String>,
    },
    /// Backend-as-a-service REST API.
    Rest {
        base_url: String,
        service_key: String,
    },
}

#[derive(Debug, Clone)]
pub struct CloudStorageConfig {
    /// Provider reported by the legacy check-connection endpoint.
    pub provider: ProviderId,
    pub backend: ConnectionBackend,
}

impl CloudStorageConfig {
    pub const DEFAULT_PROVIDER: &'static str = "dropbox";

    fn from_env() -> Result<Self, ConfigError> {
        let raw_provider = env::var("CLOUD_STORAGE_PROVIDER")
            .unwrap_or_else(|_| Self::DEFAULT_PROVIDER.to_string());
        let provider = ProviderId::parse(raw_provider.trim())?;

        let backend = match env::var("BACKEND_URL") {
            Ok(base_url) if !base_url.trim().is_empty() => {
                let service_key = env::var("BACKEND_SERVICE_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty())
                    .ok_or(ConfigError::MissingServiceKey)?;
                ConnectionBackend::Rest {
                    base_url: base_url.trim().to_string(),
                    service_key,
                }
            }
            _ => ConnectionBackend::Static {
                connections: parse_connection_seeds(
                    &env::var("CLOUD_STORAGE_SYSTEM_CONNECTIONS").unwrap_or_default(),
                )?,
            },
        };

        Ok(Self { provider, backend })
    }
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: raw.to_string(),
        }),
    }
}

/// The login path ends up in a `Location` header, so it has to be a valid
/// header value and a same-origin absolute path.
fn parse_login_path(raw: &str) -> Result<String, ConfigError> {
    let path = raw.trim();
    let same_origin = path.starts_with('/') && !path.starts_with("//");
    if same_origin && HeaderValue::from_str(path).is_ok() {
        Ok(path.to_string())
    } else {
        Err(ConfigError::InvalidLoginPath {
            value: raw.to_string(),
        })
    }
}

fn parse_route_patterns(raw: &str) -> Result<Vec<RoutePattern>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| RoutePattern::parse(entry).map_err(ConfigError::InvalidRoutePattern))
        .collect()
}

fn parse_connection_seeds(raw: &str) -> Result<BTreeMap<ProviderId, String>, ConfigError> {
    let mut connections = BTreeMap::new();
    for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let (provider, connection_id) = entry
            .split_once('=')
            .map(|(provider, id)| (provider.trim(), id.trim()))
            .filter(|(_, id)| !id.is_empty())
            .ok_or_else(|| ConfigError::InvalidConnectionSeed {
                entry: entry.to_string(),
            })?;
        connections.insert(ProviderId::parse(provider)?, connection_id.to_string());
    }
    Ok(connections)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidFlag { name: &'static str, value: String },
    InvalidRoutePattern(RoutePatternError),
    InvalidLoginPath { value: String },
    InvalidProvider(InvalidProviderId),
    InvalidConnectionSeed { entry: String },
    MissingServiceKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be a boolean flag, got '{value}'")
            }
            ConfigError::InvalidRoutePattern(err) => {
                write!(f, "AUTH_PROTECTED_ROUTES is invalid: {err}")
            }
            ConfigError::InvalidLoginPath { value } => write!(
                f,
                "AUTH_LOGIN_PATH must be an absolute path usable as a Location header, got {value:?}"
            ),
            ConfigError::InvalidProvider(err) => write!(f, "{err}"),
            ConfigError::InvalidConnectionSeed { entry } => write!(
                f,
                "CLOUD_STORAGE_SYSTEM_CONNECTIONS entry '{entry}' must look like provider=connection_id"
            ),
            ConfigError::MissingServiceKey => {
                write!(f, "BACKEND_SERVICE_KEY must be set when BACKEND_URL is set")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidRoutePattern(err) => Some(err),
            ConfigError::InvalidProvider(err) => Some(err),
            ConfigError::InvalidPort
            | ConfigError::InvalidFlag { .. }
            | ConfigError::InvalidLoginPath { .. }
            | ConfigError::InvalidConnectionSeed { .. }
            | ConfigError::MissingServiceKey => None,
        }
    }
}

impl From<InvalidProviderId> for ConfigError {
    fn from(value: InvalidProviderId) -> Self {
        Self::InvalidProvider(value)
    }
}
