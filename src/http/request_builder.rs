use super::{client::Client, request::HttpRequest, Error};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;

pub const API_MEDIA_TYPE: &str = "application/vnd.github.v3+json";
pub const CLIENT_USER_AGENT: &str = "ghwatch";

pub struct RequestBuilder {
    client: Client,
    pub builder: HttpRequest,
}

impl RequestBuilder {
    pub fn new(client: Client, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder {
            client,
            builder: HttpRequest::new(url),
        }
    }

    pub fn query<V: ToString>(mut self, params: &[(&str, V)]) -> Self {
        for (key, value) in params {
            self.builder.query_param(*key, value.to_string());
        }
        self
    }

    /// Sets the versioned JSON media type and the user agent the API requires.
    pub fn api_headers(mut self) -> Self {
        self.builder
            .header(ACCEPT, API_MEDIA_TYPE)
            .header(USER_AGENT, CLIENT_USER_AGENT);

        self
    }

    pub async fn send<T>(self) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.client.send(self.builder).await?.collect()
    }
}
