pub mod github_client;
pub mod observer;
pub mod response;
pub mod template;

pub use github_client::{GithubClient, GITHUB_API_URL};
pub use observer::RateObserver;
pub use template::TemplateContext;
