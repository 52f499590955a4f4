mod issue;
mod pull_request;
mod rate_limit;
mod repository;
mod user;

pub use issue::Issue;
pub use pull_request::PullRequest;
pub use rate_limit::{RateLimit, RateLimitResources, RateLimitStatus};
pub use repository::Repository;
pub use user::User;
