//! Core contracts and request plumbing for the Launchpad platform.
//!
//! `cloud_storage` checks whether the application holds a system-level
//! cloud storage connection, `auth` gates requests behind a session check,
//! and `domain` carries the marketplace and project data contracts.

pub mod auth;
pub mod cloud_storage;
pub mod config;
pub mod domain;
pub mod error;
pub mod telemetry;
