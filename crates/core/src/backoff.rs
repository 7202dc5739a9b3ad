// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-key exponential backoff for requeued work

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::Duration;

/// Delay bounds for rate-limited requeues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Delay before the first retry; doubles with each further failure
    #[serde(default = "default_base", with = "humantime_serde")]
    pub base: Duration,
    /// Ceiling for the computed delay
    #[serde(default = "default_max", with = "humantime_serde")]
    pub max: Duration,
}

fn default_base() -> Duration {
    Duration::from_millis(5)
}

fn default_max() -> Duration {
    Duration::from_secs(1000)
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            max: default_max(),
        }
    }
}

impl BackoffConfig {
    /// Delay for a key that has already failed `failures` times
    pub fn delay_for(&self, failures: u32) -> Duration {
        2u32.checked_pow(failures)
            .and_then(|factor| self.base.checked_mul(factor))
            .map_or(self.max, |delay| delay.min(self.max))
    }
}

/// Tracks how many times each key has been requeued
#[derive(Debug)]
pub struct ItemBackoff<K> {
    config: BackoffConfig,
    failures: Mutex<HashMap<K, u32>>,
}

impl<K: Eq + Hash + Clone> ItemBackoff<K> {
    pub fn new(config: BackoffConfig) -> Self {
        Self {
            config,
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Record another failure for `key` and return how long to wait
    pub fn when(&self, key: &K) -> Duration {
        let mut failures = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        let count = failures.entry(key.clone()).or_insert(0);
        let delay = self.config.delay_for(*count);
        *count = count.saturating_add(1);
        delay
    }

    /// Number of failures recorded since the last `forget`
    pub fn num_requeues(&self, key: &K) -> u32 {
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .copied()
            .unwrap_or(0)
    }

    pub fn forget(&self, key: &K) {
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
    }
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;
