//! Request gating for session-protected routes.
//!
//! The gate is configured rather than coded: with `enabled = false` or an
//! empty route list it forwards every request untouched.

pub mod middleware;
pub mod route_pattern;
pub mod session;

pub use middleware::{session_gate, with_auth_gate, AuthGate};
pub use route_pattern::{RoutePattern, RoutePatternError};
pub use session::{CookieSessionVerifier, SessionVerifier};
