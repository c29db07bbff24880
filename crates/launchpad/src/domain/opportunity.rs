use serde::{Deserialize, Serialize};

use super::UserId;

/// Advertised piece of work on the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceOpportunity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub budget: f64,
    pub location: String,
    pub experience_level: String,
    pub project_type: String,
    /// Display order is preserved; duplicates are not removed.
    pub required_skills: Vec<String>,
    pub estimated_duration: String,
    pub status: OpportunityStatus,
    pub created_at: String,
    pub updated_at: String,
    pub created_by: UserId,
    pub is_featured: bool,
    pub views_count: u64,
    pub applications_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityStatus {
    Open,
    InProgress,
    Completed,
    Closed,
}

impl OpportunityStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Closed => "closed",
        }
    }

    pub fn accepts_applications(self) -> bool {
        matches!(self, Self::Open)
    }
}
