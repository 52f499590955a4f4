pub mod commands;
pub mod page;
pub mod rate_readout;
pub mod repo_block;
pub mod scheduler;
pub mod views;

use self::{
    page::{Dashboard, Publisher},
    rate_readout::RateReadout,
    repo_block::RepoBlock,
    scheduler::RefreshScheduler,
};
use crate::{config::Config, github::GithubClient, html::Html};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::{
    sync::{Mutex, Notify},
    task::JoinSet,
};
use tokio_util::sync::CancellationToken;

pub async fn run(config: &Config) -> Result<()> {
    let client = GithubClient::new(&config.api_url);
    let changed = Arc::new(Notify::new());
    let readout = Arc::new(Mutex::new(RateReadout::default()));

    rate_readout::check_limit(&client, &readout, &changed).await?;
    client
        .set_observer(rate_readout::observer(readout.clone(), changed.clone()))
        .await;

    let mut repositories = Vec::new();
    for org in &config.orgs {
        log::info!("Listing repositories of {}", org);
        let repos = client
            .list_org_repos(org)
            .await
            .with_context(|| format!("Cannot list the repositories of {}", org))?;
        repositories.extend(repos);
    }
    log::info!("Watching {} repositories", repositories.len());

    let mut dashboard = Dashboard::new(&config.title, readout);
    let schedulers: Vec<Arc<RefreshScheduler>> = repositories
        .into_iter()
        .map(|repository| {
            let block = Arc::new(Mutex::new(RepoBlock::new(&Html, &repository)));
            dashboard.add_block(block.clone());

            Arc::new(RefreshScheduler::new(
                repository,
                client.clone(),
                block,
                changed.clone(),
                config.refresh_interval(),
            ))
        })
        .collect();

    let dashboard = Arc::new(dashboard);
    let publisher = Publisher::new(&config.output)?;
    let cancel = CancellationToken::new();
    let mut tasks = JoinSet::new();

    for scheduler in &schedulers {
        let scheduler = scheduler.clone();
        let cancel = cancel.clone();
        tasks.spawn(async move { scheduler.run(cancel).await });
    }

    {
        let dashboard = dashboard.clone();
        let changed = changed.clone();
        let cancel = cancel.clone();
        tasks.spawn(async move { publisher.run(&dashboard, &changed, cancel).await });
    }

    tasks.spawn(commands::dispatch_commands(
        commands::spawn_stdin_reader(),
        schedulers,
        cancel.clone(),
    ));

    log::info!(
        "Publishing to {}; type a repository name (or `all`) to refresh",
        config.output.display()
    );

    tokio::signal::ctrl_c()
        .await
        .context("Cannot listen for Ctrl-C")?;

    log::info!("Shutting down");
    cancel.cancel();

    while let Some(result) = tasks.join_next().await {
        result?;
    }

    Ok(())
}
