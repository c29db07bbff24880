//! Marketplace and project data contracts.
//!
//! These are value types only. Persistence and counter updates belong to the
//! backend service that owns the rows.

pub mod opportunity;
pub mod project;

use serde::{Deserialize, Serialize};

pub use opportunity::{MarketplaceOpportunity, OpportunityStatus};
pub use project::{OpenPosition, Project};

/// Reference to a platform account. Not an ownership link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);
