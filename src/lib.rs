pub mod config;
pub mod dashboard;
pub mod github;
pub mod html;
pub(crate) mod http;
pub mod logger;
