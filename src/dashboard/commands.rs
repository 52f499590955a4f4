use super::scheduler::{RefreshScheduler, TriggerOutcome};
use std::{
    io::{self, BufRead},
    sync::Arc,
    thread,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const ALL_REPOSITORIES: &str = "all";

/// Reads standard input on a dedicated thread so a pending read never keeps
/// the runtime from shutting down.
pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    log::warn!("Cannot read from stdin: {}", err);
                    break;
                }
            }
        }
    });

    rx
}

/// Triggers the scheduler named by `command` (a repository full name, or
/// `all`). Returns how many triggers were accepted.
pub fn dispatch(schedulers: &[Arc<RefreshScheduler>], command: &str) -> usize {
    let command = command.trim();
    if command.is_empty() {
        return 0;
    }

    let targets: Vec<&Arc<RefreshScheduler>> = schedulers
        .iter()
        .filter(|scheduler| command == ALL_REPOSITORIES || scheduler.full_name() == command)
        .collect();

    if targets.is_empty() {
        log::warn!("Unknown repository {:?}", command);
        return 0;
    }

    targets
        .into_iter()
        .map(|scheduler| {
            let outcome = scheduler.trigger();
            log::info!("Refresh of {}: {:?}", scheduler.full_name(), outcome);
            outcome
        })
        .filter(|outcome| *outcome == TriggerOutcome::Accepted)
        .count()
}

pub async fn dispatch_commands(
    mut commands: mpsc::UnboundedReceiver<String>,
    schedulers: Vec<Arc<RefreshScheduler>>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            command = commands.recv() => match command {
                Some(command) => {
                    dispatch(&schedulers, &command);
                }
                None => break,
            },
        }
    }
}
