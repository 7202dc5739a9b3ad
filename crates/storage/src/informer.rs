// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Informer: keeps the store current from a watch feed
//!
//! Each event is applied to the store and every key it touched is handed
//! to the work queue. Coalescing of repeated keys is the queue's job.

use crate::store::Store;
use recon_core::shutdown::{self, ShutdownSignal};
use recon_core::{Clock, Object, ResourceKey, SystemClock, WatchEvent, WatchFeed, WorkQueue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Informer timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InformerConfig {
    /// Re-enqueue every live key on this period
    #[serde(with = "humantime_serde")]
    pub resync_interval: Option<Duration>,
    /// Run tombstone compaction on this period
    #[serde(with = "humantime_serde")]
    pub compaction_interval: Option<Duration>,
    /// How long deleted objects stay visible to workers
    #[serde(with = "humantime_serde")]
    pub tombstone_retention: Duration,
    /// Pause before asking a failing feed for the next event
    #[serde(with = "humantime_serde")]
    pub feed_retry_delay: Duration,
}

impl Default for InformerConfig {
    fn default() -> Self {
        Self {
            resync_interval: None,
            compaction_interval: None,
            tombstone_retention: Duration::from_secs(300),
            feed_retry_delay: Duration::from_secs(1),
        }
    }
}

/// Why the informer stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InformerExit {
    FeedEnded,
    Shutdown,
}

pub struct Informer<T, C = SystemClock> {
    store: Store<T, C>,
    queue: WorkQueue<ResourceKey>,
    config: InformerConfig,
}

impl<T: Object, C: Clock> Informer<T, C> {
    pub fn new(store: Store<T, C>, queue: WorkQueue<ResourceKey>, config: InformerConfig) -> Self {
        Self {
            store,
            queue,
            config,
        }
    }

    /// Consume `feed` until it ends or shutdown is signalled
    ///
    /// `WatchFeed::next_event` must be cancel safe: it is raced against
    /// the timers and the shutdown signal.
    pub async fn run<F>(self, mut feed: F, mut stop: ShutdownSignal) -> InformerExit
    where
        F: WatchFeed<T>,
    {
        let mut resync = periodic(self.config.resync_interval);
        let mut compaction = periodic(self.config.compaction_interval);
        tracing::info!(
            resync = ?self.config.resync_interval,
            compaction = ?self.config.compaction_interval,
            "informer started"
        );

        loop {
            tokio::select! {
                _ = shutdown::signalled(&mut stop) => {
                    tracing::info!("informer stopping");
                    return InformerExit::Shutdown;
                }
                next = feed.next_event() => match next {
                    Ok(Some(event)) => self.dispatch(event),
                    Ok(None) => {
                        tracing::info!("watch feed ended");
                        return InformerExit::FeedEnded;
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            retry_in_ms = self.config.feed_retry_delay.as_millis() as u64,
                            "watch feed error"
                        );
                        tokio::select! {
                            _ = shutdown::signalled(&mut stop) => return InformerExit::Shutdown,
                            _ = tokio::time::sleep(self.config.feed_retry_delay) => {}
                        }
                    }
                },
                _ = tick(&mut resync) => self.resync(),
                _ = tick(&mut compaction) => {
                    let removed = self.store.compact(self.config.tombstone_retention);
                    if removed > 0 {
                        tracing::debug!(removed, "compacted tombstones");
                    }
                }
            }
        }
    }

    fn dispatch(&self, event: WatchEvent<T>) {
        let kind = event.kind();
        let keys = self.store.apply(event);
        tracing::debug!(kind, keys = keys.len(), "applied watch event");
        for key in keys {
            self.queue.add(key);
        }
    }

    fn resync(&self) {
        let keys = self.store.keys();
        tracing::debug!(keys = keys.len(), "resync");
        for key in keys {
            self.queue.add(key);
        }
    }
}

fn periodic(period: Option<Duration>) -> Option<Interval> {
    let period = period.filter(|p| !p.is_zero())?;
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    Some(interval)
}

async fn tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "informer_tests.rs"]
mod tests;
