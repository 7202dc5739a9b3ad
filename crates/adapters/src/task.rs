// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduled task contract
//!
//! Periodic work that shares the controller's process but not its loop.

use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by a scheduled task run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("task failed: {0}")]
    Failed(String),
}

impl TaskError {
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self::Failed(reason.to_string())
    }
}

/// One-shot action run on a fixed interval
#[async_trait]
pub trait ScheduledTask: Send + Sync + 'static {
    async fn run(&self) -> Result<(), TaskError>;
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeTask;

#[cfg(any(test, feature = "test-support"))]
mod fake {
    #![cfg_attr(coverage_nightly, coverage(off))]

    use super::{ScheduledTask, TaskError};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Default)]
    struct FakeTaskState {
        runs: usize,
        running: usize,
        max_running: usize,
        scripted: VecDeque<Result<(), TaskError>>,
    }

    /// Fake task that counts runs and replays scripted results
    #[derive(Clone, Default)]
    pub struct FakeTask {
        state: Arc<Mutex<FakeTaskState>>,
        duration: Duration,
    }

    impl FakeTask {
        pub fn new() -> Self {
            Self::default()
        }

        /// Each run takes this long
        pub fn with_duration(mut self, duration: Duration) -> Self {
            self.duration = duration;
            self
        }

        /// Queue a result for the next run
        pub fn push_result(&self, result: Result<(), TaskError>) {
            self.lock().scripted.push_back(result);
        }

        pub fn runs(&self) -> usize {
            self.lock().runs
        }

        /// Highest number of runs in progress at once
        pub fn max_running(&self) -> usize {
            self.lock().max_running
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, FakeTaskState> {
            self.state.lock().unwrap_or_else(|e| e.into_inner())
        }
    }

    #[async_trait]
    impl ScheduledTask for FakeTask {
        async fn run(&self) -> Result<(), TaskError> {
            let result = {
                let mut state = self.lock();
                state.runs += 1;
                state.running += 1;
                state.max_running = state.max_running.max(state.running);
                state.scripted.pop_front().unwrap_or(Ok(()))
            };
            if !self.duration.is_zero() {
                tokio::time::sleep(self.duration).await;
            }
            self.lock().running -= 1;
            result
        }
    }
}
