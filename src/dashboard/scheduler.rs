use super::{repo_block::RepoBlock, views};
use crate::{
    github::{response::Repository, GithubClient},
    html::Html,
};
use anyhow::Result;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::sync::{mpsc, Mutex, Notify};
use tokio_util::sync::CancellationToken;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Reloading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Reloaded { pulls: usize, issues: usize },
    Skipped,
}

struct ReloadGuard<'a>(&'a AtomicBool);

impl<'a> ReloadGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ReloadGuard(flag))
    }
}

impl Drop for ReloadGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Keeps one repository block up to date: reloads on start, after every
/// refresh interval and on manual triggers, never more than one at a time.
pub struct RefreshScheduler {
    repository: Repository,
    client: GithubClient,
    html: Html,
    block: Arc<Mutex<RepoBlock>>,
    changed: Arc<Notify>,
    interval: Duration,
    reloading: AtomicBool,
    triggers: mpsc::Sender<()>,
    pending: Mutex<mpsc::Receiver<()>>,
}

impl RefreshScheduler {
    pub fn new(
        repository: Repository,
        client: GithubClient,
        block: Arc<Mutex<RepoBlock>>,
        changed: Arc<Notify>,
        interval: Duration,
    ) -> Self {
        let (triggers, pending) = mpsc::channel(1);

        RefreshScheduler {
            repository,
            client,
            html: Html,
            block,
            changed,
            interval,
            reloading: AtomicBool::new(false),
            triggers,
            pending: Mutex::new(pending),
        }
    }

    pub fn full_name(&self) -> &str {
        &self.repository.full_name
    }

    pub fn state(&self) -> RefreshState {
        if self.reloading.load(Ordering::Acquire) {
            RefreshState::Reloading
        } else {
            RefreshState::Idle
        }
    }

    /// Asks the drive loop for an immediate reload. Rejected while a reload is
    /// in flight or another trigger is already waiting.
    pub fn trigger(&self) -> TriggerOutcome {
        if self.state() == RefreshState::Reloading {
            log::debug!("{} is already reloading, ignoring trigger", self.full_name());
            return TriggerOutcome::Rejected;
        }

        match self.triggers.try_send(()) {
            Ok(()) => TriggerOutcome::Accepted,
            Err(_) => {
                log::debug!("{} already has a pending reload", self.full_name());
                TriggerOutcome::Rejected
            }
        }
    }

    /// Fetches open pulls and issues and swaps a freshly built info subtree
    /// into the block. On failure the previous subtree stays attached and an
    /// error notice is shown above it.
    pub async fn reload(&self) -> Result<ReloadOutcome> {
        let Some(guard) = ReloadGuard::acquire(&self.reloading) else {
            return Ok(ReloadOutcome::Skipped);
        };

        log::debug!("Reloading {}", self.full_name());
        let fetched = tokio::try_join!(
            self.client.list_open_pulls(&self.repository),
            self.client.list_open_issues(&self.repository)
        );

        let (pulls, issues) = match fetched {
            Ok(fetched) => fetched,
            Err(err) => {
                let notice = views::error_notice(
                    &self.html,
                    &format!("Refresh failed, showing previous data: {:#}", err),
                );
                self.block.lock().await.set_notice(notice);
                drop(guard);
                self.changed.notify_one();

                return Err(err.context(format!("Cannot reload {}", self.full_name())));
            }
        };

        let info = views::info(&self.html, &pulls, &issues);
        self.block.lock().await.swap_info(info);
        drop(guard);
        self.changed.notify_one();

        log::info!(
            "Reloaded {}: {} open pull request(s), {} open issue(s)",
            self.full_name(),
            pulls.len(),
            issues.len()
        );

        Ok(ReloadOutcome::Reloaded {
            pulls: pulls.len(),
            issues: issues.len(),
        })
    }

    /// Drive loop. A fresh timer is armed after every reload, so a manual
    /// trigger replaces the pending one.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut pending = self.pending.lock().await;

        loop {
            if let Err(err) = self.reload().await {
                log::warn!("{:#}", err);
            }

            // Triggers queued before the reload started are already served.
            while pending.try_recv().is_ok() {}

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {
                    log::debug!("Scheduled refresh of {}", self.full_name());
                }
                _ = pending.recv() => {
                    log::debug!("Manual refresh of {}", self.full_name());
                }
            }
        }

        log::debug!("Stopped refreshing {}", self.full_name());
    }
}
