use crate::{
    attrs,
    github::{response::RateLimit, GithubClient, RateObserver},
    html::{Child, DisplayNode, Html},
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

const UNKNOWN: &str = "??";

/// Remaining request budget as last reported by the API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateReadout {
    remaining: Option<u64>,
    reset: Option<DateTime<Utc>>,
}

impl RateReadout {
    pub fn update(&mut self, limit: &RateLimit) {
        self.remaining = Some(limit.remaining());
        self.reset = limit.reset_at();
    }

    pub fn remaining(&self) -> Option<u64> {
        self.remaining
    }

    pub fn node(&self, h: &Html) -> DisplayNode {
        let remaining = self
            .remaining
            .map(|remaining| remaining.to_string())
            .unwrap_or_else(|| UNKNOWN.to_owned());
        let reset = self
            .reset
            .map(|reset| reset.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| UNKNOWN.to_owned());

        h.p(
            vec![
                Child::from("You have "),
                h.kbd(remaining, attrs! {}).into(),
                Child::from(" requests remaining which will reset at "),
                h.kbd(reset, attrs! {}).into(),
                Child::from("."),
            ],
            attrs! { "class" => "rate-limit" },
        )
    }
}

pub async fn check_limit(
    client: &GithubClient,
    readout: &Mutex<RateReadout>,
    changed: &Notify,
) -> Result<()> {
    let limit = client
        .rate_limit()
        .await
        .context("Cannot read the rate limit")?;

    log::debug!("{} requests remaining", limit.remaining());
    readout.lock().await.update(&limit);
    changed.notify_one();

    Ok(())
}

/// Observer refreshing `readout` after every tracked request.
pub fn observer(readout: Arc<Mutex<RateReadout>>, changed: Arc<Notify>) -> RateObserver {
    RateObserver::new(move |client| {
        let readout = readout.clone();
        let changed = changed.clone();
        async move {
            if let Err(err) = check_limit(&client, &readout, &changed).await {
                log::warn!("{:#}", err);
            }
        }
    })
}
