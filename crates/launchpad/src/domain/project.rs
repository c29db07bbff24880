use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::UserId;

/// Open role on a project. The shape is owned by the frontend and is kept as
/// an untyped record.
pub type OpenPosition = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: String,
    pub visibility: String,
    pub created_at: String,
    pub updated_at: String,
    pub owner_id: UserId,
    pub goals: String,
    pub target_market: String,
    pub accepts_support: bool,
    pub open_positions: Vec<OpenPosition>,
    /// `None` means the owner never configured it, which is not the same as `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_project_access: Option<bool>,
}

impl Project {
    pub fn project_access_configured(&self) -> bool {
        self.show_project_access.is_some()
    }
}
