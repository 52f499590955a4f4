use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub full_name: String,
    pub pulls_url: String,
    pub issues_url: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl Repository {
    /// Archived and disabled repositories are never shown.
    pub fn is_active(&self) -> bool {
        !(self.archived || self.disabled)
    }
}
