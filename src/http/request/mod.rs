use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// A fully described GET request, ready to be handed to [`crate::http::Client`].
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>) -> Self {
        HttpRequest {
            url: url.into(),
            headers: HeaderMap::new(),
            query: Vec::new(),
        }
    }

    pub fn header(&mut self, name: HeaderName, value: &'static str) -> &mut Self {
        self.headers.insert(name, HeaderValue::from_static(value));
        self
    }

    pub fn query_param(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.query.push((key.into(), value.to_string()));
        self
    }
}
