// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle: state lock, wiring and the serve loop

use crate::config::{Config, ConfigError};
use fs2::FileExt;
use recon_adapters::{EchoHandler, FaultReporter, TracedHandler, TracingFaultReporter};
use recon_core::shutdown::{self, ShutdownSignal};
use recon_core::{Resource, WatchError, WatchFeed};
use recon_engine::{
    Controller, ControllerDeps, ControllerError, Scheduler, SchedulerError,
};
use recon_storage::Store;
use recon_submit::{parse_parameters, DryRunClient, SubmitJob};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Failed to acquire lock: another controller is using {0}")]
    LockFailed(PathBuf, #[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to open watch feed: {0}")]
    Feed(#[from] WatchError),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    Controller(#[from] ControllerError),
}

/// Exclusive lock on a state directory, released on drop
pub struct StateLock {
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    _file: File,
    path: PathBuf,
}

impl StateLock {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!("Failed to remove lock file: {}", e);
        }
    }
}

/// Take the lock file in `state_dir`, creating the directory if needed
pub fn lock_state_dir(state_dir: &Path) -> Result<StateLock, LifecycleError> {
    std::fs::create_dir_all(state_dir)?;
    let path = state_dir.join("recond.pid");
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&path)?;
    file.try_lock_exclusive()
        .map_err(|e| LifecycleError::LockFailed(state_dir.to_path_buf(), e))?;

    file.set_len(0)?;
    writeln!(file, "{}", std::process::id())?;
    Ok(StateLock { _file: file, path })
}

/// One submission job per `[[schedule]]` entry
pub fn build_scheduler(
    config: &Config,
    reporter: Arc<dyn FaultReporter>,
) -> Result<Scheduler, LifecycleError> {
    let mut scheduler = Scheduler::new(reporter);
    for entry in &config.schedule {
        let job = SubmitJob::new(
            entry.manifest.clone(),
            entry.namespace.clone(),
            parse_parameters(&entry.parameters),
            DryRunClient::new(),
        );
        scheduler.register(entry.name.clone(), entry.interval, job)?;
        info!(
            task = %entry.name,
            interval = ?entry.interval,
            manifest = %entry.manifest.display(),
            "scheduled workflow submission"
        );
    }
    Ok(scheduler)
}

/// Run the controller and scheduler until shutdown
///
/// Reconciled keys are echoed to `out` as `settled <key>` / `removed <key>`.
pub async fn serve<F, W>(
    config: &Config,
    feed: F,
    out: W,
    stop: ShutdownSignal,
) -> Result<(), LifecycleError>
where
    F: WatchFeed<Resource>,
    W: Write + Send + 'static,
{
    let reporter: Arc<dyn FaultReporter> = Arc::new(TracingFaultReporter::new());

    let scheduler = build_scheduler(config, Arc::clone(&reporter))?;
    let (stop_scheduler, scheduler_stop) = shutdown::channel();
    let scheduler_task = (!scheduler.is_empty()).then(|| tokio::spawn(scheduler.run(scheduler_stop)));

    let controller = Controller::new(
        ControllerDeps {
            store: Store::new(),
            handler: TracedHandler::new(EchoHandler::new(out)),
            reporter,
        },
        config.controller.clone(),
        config.informer.clone(),
    );
    info!(
        workers = config.controller.workers,
        max_retries = config.controller.max_retries,
        "controller starting"
    );
    let result = controller.run(feed, stop).await;

    stop_scheduler.send_replace(true);
    if let Some(task) = scheduler_task {
        if let Err(e) = task.await {
            warn!("Scheduler task failed: {}", e);
        }
    }

    result.map_err(LifecycleError::from)
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
