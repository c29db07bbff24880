//! System-level cloud storage connection checks.
//!
//! A [`ConnectionDirectory`] answers whether the application as a whole (not
//! an individual user) has linked a storage provider. [`ConnectionChecker`]
//! turns each lookup into a [`ConnectionStatus`] and the router exposes it
//! over HTTP.

pub mod checker;
pub mod directory;
pub mod rest;
pub mod router;


pub use checker::{ConnectionChecker, ConnectionStatus, ConnectionStatusView};
pub use directory::{
    CloudStorageError, ConnectionDirectory, ConnectionRecord, InvalidProviderId, ProviderId,
};
pub use rest::RestConnectionDirectory;
pub use router::{cloud_storage_router, CheckConnectionResponse};
