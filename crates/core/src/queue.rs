// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deduplicating, rate-limited work queue
//!
//! Keys move through three sets:
//! - **dirty**: waiting to be processed (each key at most once)
//! - **queue**: dirty keys that are ready to be handed out, in FIFO order
//! - **processing**: keys currently handed out by `get`
//!
//! A key added while it is being processed stays dirty but is not queued.
//! `done` puts it back on the queue, so the same key is never handed to
//! two consumers at once.

use crate::backoff::{BackoffConfig, ItemBackoff};
use std::collections::{HashSet, VecDeque};
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{watch, Notify};

struct State<K> {
    queue: VecDeque<K>,
    dirty: HashSet<K>,
    processing: HashSet<K>,
    shutting_down: bool,
}

struct Shared<K> {
    state: Mutex<State<K>>,
    ready: Notify,
    shutdown: watch::Sender<bool>,
    backoff: ItemBackoff<K>,
}

/// Work queue shared between the informer and the workers
pub struct WorkQueue<K> {
    shared: Arc<Shared<K>>,
}

impl<K> Clone for WorkQueue<K> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<K> WorkQueue<K>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
{
    pub fn new(backoff: BackoffConfig) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    queue: VecDeque::new(),
                    dirty: HashSet::new(),
                    processing: HashSet::new(),
                    shutting_down: false,
                }),
                ready: Notify::new(),
                shutdown,
                backoff: ItemBackoff::new(backoff),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State<K>> {
        self.shared.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Mark `key` as needing processing
    ///
    /// Returns false when the key was already pending (coalesced) or the
    /// queue is shutting down.
    pub fn add(&self, key: K) -> bool {
        let mut state = self.state();
        if state.shutting_down || !state.dirty.insert(key.clone()) {
            return false;
        }
        if state.processing.contains(&key) {
            // Requeued by `done`
            return true;
        }
        state.queue.push_back(key);
        drop(state);
        self.shared.ready.notify_one();
        true
    }

    /// Add `key` once `delay` has elapsed
    ///
    /// Must be called from within a tokio runtime when `delay` is non-zero.
    /// Pending delayed adds are dropped when the queue shuts down.
    pub fn add_after(&self, key: K, delay: Duration) {
        if delay.is_zero() {
            self.add(key);
            return;
        }
        if self.is_shutting_down() {
            return;
        }
        let queue = self.clone();
        let mut shutdown = self.shared.shutdown.subscribe();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    queue.add(key);
                }
                _ = async { let _ = shutdown.wait_for(|down| *down).await; } => {}
            }
        });
    }

    /// Add `key` after its per-key backoff delay; returns the delay used
    pub fn add_rate_limited(&self, key: K) -> Duration {
        let delay = self.shared.backoff.when(&key);
        self.add_after(key, delay);
        delay
    }

    /// Wait for the next key to process
    ///
    /// Returns `None` once the queue is shutting down and nothing is left to
    /// hand out. Every key returned must be passed to `done`.
    pub async fn get(&self) -> Option<K> {
        loop {
            let notified = self.shared.ready.notified();
            tokio::pin!(notified);
            // Register before inspecting state so a wakeup between the check
            // and the await is not lost.
            notified.as_mut().enable();

            {
                let mut state = self.state();
                if let Some(key) = state.queue.pop_front() {
                    state.dirty.remove(&key);
                    state.processing.insert(key.clone());
                    return Some(key);
                }
                if state.shutting_down {
                    return None;
                }
            }

            notified.await;
        }
    }

    /// Finish processing `key`, requeueing it if it was added in the meantime
    pub fn done(&self, key: &K) {
        let mut state = self.state();
        if state.processing.remove(key) && state.dirty.contains(key) {
            state.queue.push_back(key.clone());
            drop(state);
            self.shared.ready.notify_one();
        }
    }

    /// Clear the retry history of `key`
    pub fn forget(&self, key: &K) {
        self.shared.backoff.forget(key);
    }

    /// How many rate-limited requeues `key` has had since it was last forgotten
    pub fn num_requeues(&self, key: &K) -> u32 {
        self.shared.backoff.num_requeues(key)
    }

    /// Stop accepting keys; `get` drains what is queued, then returns `None`
    pub fn shut_down(&self) {
        let pending = {
            let mut state = self.state();
            state.shutting_down = true;
            state.queue.len()
        };
        tracing::debug!(pending, "work queue shutting down");
        self.shared.shutdown.send_replace(true);
        self.shared.ready.notify_waiters();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.state().shutting_down
    }

    /// Keys ready to be handed out
    pub fn len(&self) -> usize {
        self.state().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys currently handed out and not yet done
    pub fn in_flight(&self) -> usize {
        self.state().processing.len()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
