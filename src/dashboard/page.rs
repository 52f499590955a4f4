use super::{rate_readout::RateReadout, repo_block::RepoBlock};
use crate::{
    attrs,
    html::{
        template::{handlebars, render_page},
        DisplayNode, Html,
    },
};
use anyhow::{Context, Result};
use handlebars::Handlebars;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::{Mutex, Notify};
use tokio_util::sync::CancellationToken;

/// Top-level assembly: title, rate readout and one block per repository.
pub struct Dashboard {
    html: Html,
    title: String,
    readout: Arc<Mutex<RateReadout>>,
    blocks: Vec<Arc<Mutex<RepoBlock>>>,
}

impl Dashboard {
    pub fn new(title: impl Into<String>, readout: Arc<Mutex<RateReadout>>) -> Self {
        Dashboard {
            html: Html,
            title: title.into(),
            readout,
            blocks: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn add_block(&mut self, block: Arc<Mutex<RepoBlock>>) {
        self.blocks.push(block);
    }

    /// Builds the current `body` tree from the live blocks.
    pub async fn snapshot(&self) -> DisplayNode {
        let h = &self.html;

        let readout = self.readout.lock().await.node(h);

        let mut blocks = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            blocks.push(block.lock().await.node(h));
        }

        h.body(
            h.div(
                vec![
                    h.h1(self.title.as_str(), attrs! {}),
                    readout,
                    h.div(blocks, attrs! { "class" => "repos" }),
                ],
                attrs! { "id" => "content" },
            ),
            attrs! {},
        )
    }
}

/// Writes the dashboard to an HTML file whenever it changes.
pub struct Publisher {
    output: PathBuf,
    handlebars: Handlebars<'static>,
}

impl Publisher {
    pub fn new(output: impl Into<PathBuf>) -> Result<Self> {
        Ok(Publisher {
            output: output.into(),
            handlebars: handlebars().context("Cannot load the page template")?,
        })
    }

    pub async fn publish(&self, dashboard: &Dashboard) -> Result<()> {
        let body = dashboard.snapshot().await;
        let page = render_page(&self.handlebars, dashboard.title(), &body)?;

        // Readers only ever see a complete page.
        let staging = self.staging_path();
        tokio::fs::write(&staging, page)
            .await
            .with_context(|| format!("Cannot write {}", staging.display()))?;
        tokio::fs::rename(&staging, &self.output)
            .await
            .with_context(|| format!("Cannot replace {}", self.output.display()))?;

        log::debug!("Published {}", self.output.display());
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.output.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }

    pub async fn run(&self, dashboard: &Dashboard, changed: &Notify, cancel: CancellationToken) {
        loop {
            if let Err(err) = self.publish(dashboard).await {
                log::error!("{:#}", err);
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = changed.notified() => {}
            }
        }
    }
}
