use super::{
    request::HttpRequest,
    request_builder::RequestBuilder,
    response::{AsyncFrom, Response},
    Error,
};
use serde::de::DeserializeOwned;

#[derive(Clone, Debug)]
pub struct Client(reqwest::Client);

impl Client {
    pub fn new() -> Client {
        Client(reqwest::Client::new())
    }

    pub async fn send<T>(&self, request: HttpRequest) -> Result<Response<T>, Error>
    where
        T: DeserializeOwned,
    {
        let request = self
            .0
            .get(&request.url)
            .headers(request.headers)
            .query(&request.query)
            .build()?;

        let url = request.url().clone();
        let response = self.0.execute(request).await?;
        log::debug!("GET {} -> {}", url, response.status());

        Ok(Response::async_from(response).await)
    }
}

pub trait ClientRequestBuilder {
    fn get(self, url: impl Into<String>) -> RequestBuilder;
}

impl ClientRequestBuilder for Client {
    fn get(self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(self, url)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
