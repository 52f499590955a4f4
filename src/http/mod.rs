pub mod client;
pub mod request;
pub mod request_builder;
pub mod response;

pub use client::Client;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed with status {status}: {message}")]
    StatusError { status: u16, message: String },
    #[error("Failed to send request")]
    TransportError {
        #[from]
        cause: reqwest::Error,
    },
    #[error("Failed to read response text")]
    ReadResponseTextError {
        #[source]
        cause: reqwest::Error,
    },
    #[error("Failed to parse response")]
    ParseResponseError {
        #[source]
        cause: serde_json::Error,
    },
}
