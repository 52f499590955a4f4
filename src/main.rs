use anyhow::{Context, Result};
use ghwatch::{config::Config, dashboard, logger};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().await.context("Cannot load config file")?;
    logger::init(config.log_level)?;

    log::info!("Starting");
    dashboard::run(&config)
        .await
        .context("Cannot run the dashboard")?;

    Ok(())
}
