// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciliation worker
//!
//! Takes one key at a time from the queue, looks up its cached state and
//! tells the handler whether the object is settled or removed.

use recon_adapters::{Fault, FaultKind, FaultReporter, Handler};
use recon_core::{Clock, Object, ResourceKey, WorkQueue};
use recon_storage::{CacheEntry, Store, StoreError};
use std::marker::PhantomData;
use std::sync::Arc;

/// Read access to cached objects by key
pub trait Lookup<T>: Send + Sync + 'static {
    fn lookup(&self, key: &ResourceKey) -> Result<Option<CacheEntry<T>>, StoreError>;
}

impl<T: Object, C: Clock> Lookup<T> for Store<T, C> {
    fn lookup(&self, key: &ResourceKey) -> Result<Option<CacheEntry<T>>, StoreError> {
        self.get(key)
    }
}

/// What happened to one dequeued key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// `on_settled` succeeded
    Settled,
    /// `on_removed` succeeded
    Removed,
    /// Scheduled for another attempt; `attempt` counts retries so far
    Requeued { attempt: u32 },
    /// Given up on and reported
    Dropped,
}

/// Calls `done` when the dequeued item goes out of scope, panics included
struct DoneGuard<'a> {
    queue: &'a WorkQueue<ResourceKey>,
    key: &'a ResourceKey,
}

impl Drop for DoneGuard<'_> {
    fn drop(&mut self) {
        self.queue.done(self.key);
    }
}

pub struct Worker<T, L, H> {
    cache: L,
    queue: WorkQueue<ResourceKey>,
    handler: Arc<H>,
    reporter: Arc<dyn FaultReporter>,
    max_retries: u32,
    _object: PhantomData<fn() -> T>,
}

impl<T, L, H> Worker<T, L, H>
where
    T: Send + Sync + 'static,
    L: Lookup<T>,
    H: Handler<T>,
{
    pub fn new(
        cache: L,
        queue: WorkQueue<ResourceKey>,
        handler: Arc<H>,
        reporter: Arc<dyn FaultReporter>,
        max_retries: u32,
    ) -> Self {
        Self {
            cache,
            queue,
            handler,
            reporter,
            max_retries,
            _object: PhantomData,
        }
    }

    /// Process keys until the queue shuts down and drains
    pub async fn run(&self) {
        while self.process_next_item().await.is_some() {}
    }

    /// Process one key; `None` once the queue is shut down and empty
    pub async fn process_next_item(&self) -> Option<ItemOutcome> {
        let key = self.queue.get().await?;
        let _done = DoneGuard {
            queue: &self.queue,
            key: &key,
        };
        let outcome = self.reconcile(&key).await;
        tracing::debug!(key = %key, ?outcome, "processed");
        Some(outcome)
    }

    async fn reconcile(&self, key: &ResourceKey) -> ItemOutcome {
        let entry = match self.cache.lookup(key) {
            Ok(entry) => entry,
            Err(e) => return self.retry_or_drop(key, &e.to_string()),
        };

        let result = match entry {
            Some(CacheEntry {
                object,
                exists: true,
                ..
            }) => self
                .handler
                .on_settled(key, &object)
                .await
                .map(|()| ItemOutcome::Settled),
            _ => self
                .handler
                .on_removed(key)
                .await
                .map(|()| ItemOutcome::Removed),
        };

        match result {
            Ok(outcome) => {
                self.queue.forget(key);
                outcome
            }
            Err(e) if e.is_retryable() => self.retry_or_drop(key, &e.to_string()),
            Err(e) => {
                self.queue.forget(key);
                self.reporter
                    .report(Fault::for_key(FaultKind::HandlerFailed, key, e.to_string()));
                ItemOutcome::Dropped
            }
        }
    }

    fn retry_or_drop(&self, key: &ResourceKey, error: &str) -> ItemOutcome {
        // A shutting-down queue ignores adds, so a retry would be lost
        if self.queue.is_shutting_down() {
            self.queue.forget(key);
            tracing::warn!(key = %key, error, "not retried, queue is shutting down");
            return ItemOutcome::Dropped;
        }

        let retries = self.queue.num_requeues(key);
        if retries < self.max_retries {
            let delay = self.queue.add_rate_limited(key.clone());
            tracing::warn!(
                key = %key,
                attempt = retries + 1,
                delay_ms = delay.as_millis() as u64,
                error,
                "requeued"
            );
            return ItemOutcome::Requeued {
                attempt: retries + 1,
            };
        }

        self.queue.forget(key);
        self.reporter.report(Fault::for_key(
            FaultKind::RetriesExhausted,
            key,
            format!("dropped after {} retries: {}", retries, error),
        ));
        ItemOutcome::Dropped
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
