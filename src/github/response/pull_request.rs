use super::User;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub html_url: String,
    pub user: User,
    #[serde(default)]
    pub requested_reviewers: Vec<User>,
    #[serde(default)]
    pub assignees: Vec<User>,
}
