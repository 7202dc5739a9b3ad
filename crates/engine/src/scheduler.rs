// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interval scheduler for periodic tasks
//!
//! Each registered task gets its own loop. A task never overlaps with
//! itself: ticks that fire while a run is in progress are skipped.

use crate::error::{panic_message, SchedulerError};
use recon_adapters::{Fault, FaultKind, FaultReporter, ScheduledTask};
use recon_core::shutdown::{self, ShutdownSignal};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

struct Entry {
    name: String,
    interval: Duration,
    task: Arc<dyn ScheduledTask>,
}

pub struct Scheduler {
    entries: Vec<Entry>,
    reporter: Arc<dyn FaultReporter>,
}

impl Scheduler {
    pub fn new(reporter: Arc<dyn FaultReporter>) -> Self {
        Self {
            entries: Vec::new(),
            reporter,
        }
    }

    /// Run `task` every `interval`, starting one interval from now
    pub fn register(
        &mut self,
        name: impl Into<String>,
        interval: Duration,
        task: impl ScheduledTask,
    ) -> Result<(), SchedulerError> {
        let name = name.into();
        if interval.is_zero() {
            return Err(SchedulerError::ZeroInterval(name));
        }
        if self.entries.iter().any(|e| e.name == name) {
            return Err(SchedulerError::Duplicate(name));
        }
        self.entries.push(Entry {
            name,
            interval,
            task: Arc::new(task),
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every task until shutdown is signalled
    ///
    /// A run in progress when shutdown arrives is cancelled. A task that
    /// panics is reported and not scheduled again.
    pub async fn run(self, stop: ShutdownSignal) {
        let mut loops = JoinSet::new();
        for entry in self.entries {
            loops.spawn(run_task(entry, Arc::clone(&self.reporter), stop.clone()));
        }
        tracing::info!(tasks = loops.len(), "scheduler started");
        while loops.join_next().await.is_some() {}
        tracing::info!("scheduler stopped");
    }
}

async fn run_task(entry: Entry, reporter: Arc<dyn FaultReporter>, mut stop: ShutdownSignal) {
    let Entry {
        name,
        interval: period,
        task,
    } = entry;
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = shutdown::signalled(&mut stop) => return,
            _ = interval.tick() => {}
        }

        let start = Instant::now();
        let mut run = tokio::spawn({
            let task = Arc::clone(&task);
            async move { task.run().await }
        });
        let joined = tokio::select! {
            _ = shutdown::signalled(&mut stop) => {
                run.abort();
                tracing::info!(task = %name, "run cancelled by shutdown");
                return;
            }
            joined = &mut run => joined,
        };
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match joined {
            Ok(Ok(())) => tracing::info!(task = %name, elapsed_ms, "scheduled task finished"),
            Ok(Err(e)) => {
                tracing::warn!(task = %name, elapsed_ms, error = %e, "scheduled task failed");
                reporter.report(Fault::new(
                    FaultKind::TaskFailed,
                    format!("task {}: {}", name, e),
                ));
            }
            Err(e) => {
                tracing::error!(task = %name, "scheduled task panicked, not rescheduling");
                reporter.report(Fault::new(
                    FaultKind::Panicked,
                    format!("task {} panicked: {}", name, panic_message(e)),
                ));
                return;
            }
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
