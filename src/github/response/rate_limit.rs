use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimit {
    pub resources: RateLimitResources,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitResources {
    pub core: RateLimitStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitStatus {
    pub remaining: u64,
    /// Epoch seconds.
    pub reset: i64,
}

impl RateLimit {
    pub fn remaining(&self) -> u64 {
        self.resources.core.remaining
    }

    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.resources.core.reset, 0)
    }
}
