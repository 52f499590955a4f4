use super::github_client::GithubClient;
use std::{future::Future, pin::Pin, sync::Arc};

pub type ObserverFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

type Callback = dyn Fn(GithubClient) -> ObserverFuture + Send + Sync;

/// The single hook notified after every request that is not a rate-limit query.
///
/// It receives a handle to the client that made the request so it can issue
/// its own (rate-limit) queries without holding a reference back to it.
#[derive(Clone)]
pub struct RateObserver(Arc<Callback>);

impl RateObserver {
    pub fn new<F, Fut>(callback: F) -> Self
    where
        F: Fn(GithubClient) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let hook: Arc<Callback> =
            Arc::new(move |client: GithubClient| -> ObserverFuture { Box::pin(callback(client)) });

        RateObserver(hook)
    }

    pub fn noop() -> Self {
        RateObserver::new(|_| async {})
    }

    pub async fn notify(&self, client: GithubClient) {
        (self.0)(client).await
    }
}

impl Default for RateObserver {
    fn default() -> Self {
        Self::noop()
    }
}
