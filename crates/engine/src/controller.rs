// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Controller lifecycle
//!
//! A run goes through three stages:
//! 1. the informer starts filling the cache from the feed;
//! 2. nothing is handed to workers until the cache has synced;
//! 3. workers process keys until shutdown, then drain the queue.
//!
//! A panic in any task ends the run. The controller does not restart
//! itself; callers decide whether to run again.

use crate::error::{panic_message, ControllerError};
use crate::worker::Worker;
use recon_adapters::{Fault, FaultKind, FaultReporter, Handler};
use recon_core::shutdown::{self, ShutdownSignal};
use recon_core::{BackoffConfig, Clock, Object, ResourceKey, SystemClock, WatchFeed, WorkQueue};
use recon_storage::{Informer, InformerConfig, InformerExit, Store};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle, JoinSet};

/// Worker pool and retry settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Number of worker tasks; zero is treated as one
    pub workers: usize,
    /// Requeues allowed per key before it is dropped
    pub max_retries: u32,
    pub backoff: BackoffConfig,
    /// Shut down once the feed ends, after draining the queue
    pub stop_on_feed_end: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            max_retries: 5,
            backoff: BackoffConfig::default(),
            stop_on_feed_end: false,
        }
    }
}

/// Controller collaborators
pub struct ControllerDeps<T, H, C = SystemClock> {
    pub store: Store<T, C>,
    pub handler: H,
    pub reporter: Arc<dyn FaultReporter>,
}

pub struct Controller<T, H, C = SystemClock> {
    store: Store<T, C>,
    queue: WorkQueue<ResourceKey>,
    handler: Arc<H>,
    reporter: Arc<dyn FaultReporter>,
    config: ControllerConfig,
    informer: InformerConfig,
}

/// How the wait for cache sync ended
enum SyncGate {
    Synced,
    Shutdown,
    FeedEnded,
    InformerPanicked(String),
}

impl<T, H, C> Controller<T, H, C>
where
    T: Object,
    H: Handler<T>,
    C: Clock,
{
    pub fn new(
        deps: ControllerDeps<T, H, C>,
        config: ControllerConfig,
        informer: InformerConfig,
    ) -> Self {
        Self {
            store: deps.store,
            queue: WorkQueue::new(config.backoff),
            handler: Arc::new(deps.handler),
            reporter: deps.reporter,
            config,
            informer,
        }
    }

    pub fn store(&self) -> &Store<T, C> {
        &self.store
    }

    pub fn queue(&self) -> &WorkQueue<ResourceKey> {
        &self.queue
    }

    /// Run until shutdown
    ///
    /// Shutdown comes from `stop`, or from the end of the feed when
    /// `stop_on_feed_end` is set. Keys already queued are processed before
    /// this returns.
    pub async fn run<F>(self, feed: F, mut stop: ShutdownSignal) -> Result<(), ControllerError>
    where
        F: WatchFeed<T>,
    {
        let (stop_informer, informer_stop) = shutdown::channel();
        let informer = Informer::new(self.store.clone(), self.queue.clone(), self.informer.clone());
        let mut informer_task = Some(tokio::spawn(informer.run(feed, informer_stop)));

        match self.wait_for_sync(&mut informer_task, &mut stop).await {
            SyncGate::Synced => {}
            SyncGate::InformerPanicked(message) => {
                self.queue.shut_down();
                return Err(self.panicked("informer", message));
            }
            gate => {
                let reason = match gate {
                    SyncGate::Shutdown => "shutdown requested before cache sync",
                    _ => "watch feed ended before cache sync",
                };
                stop_informer.send_replace(true);
                if let Some(task) = informer_task.take() {
                    let _ = task.await;
                }
                self.queue.shut_down();
                self.reporter
                    .report(Fault::new(FaultKind::SyncAborted, reason));
                return Err(ControllerError::SyncAborted(reason.to_string()));
            }
        }

        let workers = self.config.workers.max(1);
        tracing::info!(workers, keys = self.store.len(), "cache synced, starting workers");
        let mut pool = JoinSet::new();
        let worker = Arc::new(Worker::new(
            self.store.clone(),
            self.queue.clone(),
            Arc::clone(&self.handler),
            Arc::clone(&self.reporter),
            self.config.max_retries,
        ));
        for _ in 0..workers {
            let worker = Arc::clone(&worker);
            pool.spawn(async move { worker.run().await });
        }

        let failure = self.supervise(&mut informer_task, &mut pool, &mut stop).await;

        self.queue.shut_down();
        stop_informer.send_replace(true);

        if let Some((task, message)) = failure {
            pool.abort_all();
            if let Some(informer) = informer_task.take() {
                informer.abort();
            }
            return Err(self.panicked(task, message));
        }

        let mut panic = None;
        while let Some(joined) = pool.join_next().await {
            if let Err(e) = joined {
                panic.get_or_insert(panic_message(e));
            }
        }
        if let Some(informer) = informer_task.take() {
            if let Err(e) = informer.await {
                if e.is_panic() {
                    return Err(self.panicked("informer", panic_message(e)));
                }
            }
        }
        if let Some(message) = panic {
            return Err(self.panicked("worker", message));
        }

        tracing::info!("controller stopped");
        Ok(())
    }

    async fn wait_for_sync(
        &self,
        informer_task: &mut Option<JoinHandle<InformerExit>>,
        stop: &mut ShutdownSignal,
    ) -> SyncGate {
        let mut synced = self.store.synced();
        let gate = tokio::select! {
            biased;
            _ = synced.wait_for(|s| *s) => SyncGate::Synced,
            _ = shutdown::signalled(stop) => SyncGate::Shutdown,
            joined = join_informer(informer_task) => {
                *informer_task = None;
                match joined {
                    Err(e) if e.is_panic() => SyncGate::InformerPanicked(panic_message(e)),
                    _ => SyncGate::FeedEnded,
                }
            }
        };
        // The feed may end right after delivering the listing
        match gate {
            SyncGate::FeedEnded if self.store.has_synced() => SyncGate::Synced,
            gate => gate,
        }
    }

    /// Wait for the run to end; returns the task that panicked, if any
    async fn supervise(
        &self,
        informer_task: &mut Option<JoinHandle<InformerExit>>,
        pool: &mut JoinSet<()>,
        stop: &mut ShutdownSignal,
    ) -> Option<(&'static str, String)> {
        if informer_task.is_none() && self.config.stop_on_feed_end {
            tracing::info!(pending = self.queue.len(), "feed ended, draining queue");
            return None;
        }
        loop {
            tokio::select! {
                _ = shutdown::signalled(stop) => {
                    tracing::info!(pending = self.queue.len(), "shutdown requested, draining queue");
                    return None;
                }
                joined = join_informer(informer_task), if informer_task.is_some() => {
                    *informer_task = None;
                    match joined {
                        Err(e) if e.is_panic() => return Some(("informer", panic_message(e))),
                        _ if self.config.stop_on_feed_end => {
                            tracing::info!(pending = self.queue.len(), "feed ended, draining queue");
                            return None;
                        }
                        _ => tracing::info!("feed ended, workers keep running"),
                    }
                }
                Some(joined) = pool.join_next() => {
                    if let Err(e) = joined {
                        return Some(("worker", panic_message(e)));
                    }
                }
            }
        }
    }

    fn panicked(&self, task: &str, message: String) -> ControllerError {
        let message = format!("{} panicked: {}", task, message);
        self.reporter
            .report(Fault::new(FaultKind::Panicked, message.clone()));
        ControllerError::Panicked(message)
    }
}

async fn join_informer(
    task: &mut Option<JoinHandle<InformerExit>>,
) -> Result<InformerExit, JoinError> {
    match task {
        Some(task) => task.await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
