use crate::{dashboard::scheduler::DEFAULT_REFRESH_INTERVAL, github::GITHUB_API_URL};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{io::ErrorKind, path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE_NAME: &str = "ghwatch.yaml";
const DEFAULT_OUTPUT_FILE_NAME: &str = "ghwatch.html";
const DEFAULT_TITLE: &str = "GitHub PRs and Issues";
const DEFAULT_ORGS: [&str; 2] = ["seL4", "seL4proj"];

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_orgs")]
    pub orgs: Vec<String>,
    #[serde(default = "Config::default_api_url")]
    pub api_url: String,
    #[serde(default = "Config::default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default = "Config::default_output")]
    pub output: PathBuf,
    #[serde(default = "Config::default_log_level")]
    pub log_level: log::Level,
    #[serde(default = "Config::default_title")]
    pub title: String,
}

impl Config {
    /// Loads `ghwatch.yaml` from the working directory; a missing file means
    /// defaults everywhere.
    pub async fn load() -> Result<Config> {
        match tokio::fs::read_to_string(DEFAULT_CONFIG_FILE_NAME).await {
            Ok(config_string) => Config::parse(&config_string)
                .with_context(|| format!("Invalid {}", DEFAULT_CONFIG_FILE_NAME)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(err) => Err(err).context(format!("Cannot read {}", DEFAULT_CONFIG_FILE_NAME)),
        }
    }

    pub fn parse(config_string: &str) -> Result<Config> {
        if config_string.trim().is_empty() {
            return Ok(Config::default());
        }

        let config = serde_yaml::from_str::<Config>(config_string)?;

        if config.refresh_interval_secs == 0 {
            bail!(anyhow::anyhow!("refresh_interval_secs must be greater than zero"));
        }

        Ok(config)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    fn default_orgs() -> Vec<String> {
        DEFAULT_ORGS.iter().map(|org| org.to_string()).collect()
    }

    fn default_api_url() -> String {
        GITHUB_API_URL.to_owned()
    }

    fn default_refresh_interval_secs() -> u64 {
        DEFAULT_REFRESH_INTERVAL.as_secs()
    }

    fn default_output() -> PathBuf {
        PathBuf::from(DEFAULT_OUTPUT_FILE_NAME)
    }

    fn default_log_level() -> log::Level {
        log::Level::Info
    }

    fn default_title() -> String {
        DEFAULT_TITLE.to_owned()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            orgs: Config::default_orgs(),
            api_url: Config::default_api_url(),
            refresh_interval_secs: Config::default_refresh_interval_secs(),
            output: Config::default_output(),
            log_level: Config::default_log_level(),
            title: Config::default_title(),
        }
    }
}
