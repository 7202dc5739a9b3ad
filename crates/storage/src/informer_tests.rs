// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use async_trait::async_trait;
use recon_core::{BackoffConfig, ObjectMeta, Resource, WatchError};
use std::collections::VecDeque;

/// Feed that replays a fixed script, then either ends or stalls
struct ScriptedFeed {
    script: VecDeque<Result<WatchEvent<Resource>, WatchError>>,
    end_when_empty: bool,
}

impl ScriptedFeed {
    fn ending(script: Vec<Result<WatchEvent<Resource>, WatchError>>) -> Self {
        Self {
            script: script.into(),
            end_when_empty: true,
        }
    }

    fn stalling(script: Vec<Result<WatchEvent<Resource>, WatchError>>) -> Self {
        Self {
            script: script.into(),
            end_when_empty: false,
        }
    }
}

#[async_trait]
impl WatchFeed<Resource> for ScriptedFeed {
    async fn next_event(&mut self) -> Result<Option<WatchEvent<Resource>>, WatchError> {
        match self.script.pop_front() {
            Some(Ok(event)) => Ok(Some(event)),
            Some(Err(e)) => Err(e),
            None if self.end_when_empty => Ok(None),
            None => std::future::pending().await,
        }
    }
}

fn resource(name: &str) -> Resource {
    Resource::new(ObjectMeta::new(Some("ns"), name))
}

fn setup(config: InformerConfig) -> (Store<Resource>, WorkQueue<ResourceKey>, Informer<Resource>) {
    let store = Store::new();
    let queue = WorkQueue::new(BackoffConfig::default());
    let informer = Informer::new(store.clone(), queue.clone(), config);
    (store, queue, informer)
}

#[tokio::test]
async fn events_update_store_and_enqueue_keys() {
    let (store, queue, informer) = setup(InformerConfig::default());
    let (_tx, stop) = shutdown::channel();
    let feed = ScriptedFeed::ending(vec![
        Ok(WatchEvent::Listed(vec![resource("a")])),
        Ok(WatchEvent::Added(resource("b"))),
        Ok(WatchEvent::Modified(resource("b"))),
    ]);

    let exit = informer.run(feed, stop).await;

    assert_eq!(exit, InformerExit::FeedEnded);
    assert!(store.has_synced());
    assert_eq!(store.len(), 2);
    // `ns/b` was touched twice but is pending once
    assert_eq!(queue.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn feed_errors_are_retried() {
    let config = InformerConfig {
        feed_retry_delay: Duration::from_millis(10),
        ..InformerConfig::default()
    };
    let (store, _queue, informer) = setup(config);
    let (_tx, stop) = shutdown::channel();
    let feed = ScriptedFeed::ending(vec![
        Err(WatchError::Disconnected("reset".to_string())),
        Ok(WatchEvent::Listed(vec![resource("a")])),
    ]);

    assert_eq!(informer.run(feed, stop).await, InformerExit::FeedEnded);
    assert!(store.has_synced());
}

#[tokio::test]
async fn shutdown_stops_a_stalled_feed() {
    let (_store, _queue, informer) = setup(InformerConfig::default());
    let (tx, stop) = shutdown::channel();
    let handle = tokio::spawn(informer.run(ScriptedFeed::stalling(vec![]), stop));

    tx.send_replace(true);
    assert_eq!(handle.await.unwrap(), InformerExit::Shutdown);
}

#[tokio::test(start_paused = true)]
async fn resync_requeues_live_keys() {
    let config = InformerConfig {
        resync_interval: Some(Duration::from_secs(60)),
        ..InformerConfig::default()
    };
    let (_store, queue, informer) = setup(config);
    let (tx, stop) = shutdown::channel();
    let feed = ScriptedFeed::stalling(vec![Ok(WatchEvent::Listed(vec![
        resource("a"),
        resource("b"),
    ]))]);
    let handle = tokio::spawn(informer.run(feed, stop));

    // Drain the initial enqueue
    for _ in 0..2 {
        let key = queue.get().await.unwrap();
        queue.done(&key);
    }
    assert!(queue.is_empty());

    tokio::time::sleep(Duration::from_secs(61)).await;
    assert_eq!(queue.len(), 2);

    tx.send_replace(true);
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn compaction_runs_on_its_interval() {
    let config = InformerConfig {
        compaction_interval: Some(Duration::from_secs(30)),
        tombstone_retention: Duration::ZERO,
        ..InformerConfig::default()
    };
    let (store, _queue, informer) = setup(config);
    let (tx, stop) = shutdown::channel();
    let feed = ScriptedFeed::stalling(vec![
        Ok(WatchEvent::Listed(vec![resource("a")])),
        Ok(WatchEvent::Deleted(resource("a"))),
    ]);
    let handle = tokio::spawn(informer.run(feed, stop));

    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(store.get(&ResourceKey::from("ns/a")).unwrap(), None);

    tx.send_replace(true);
    handle.await.unwrap();
}
