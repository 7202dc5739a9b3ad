// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process feed backed by an unbounded channel

use async_trait::async_trait;
use recon_core::{WatchError, WatchEvent, WatchFeed};
use tokio::sync::mpsc;

/// Producer half of a [`ChannelFeed`]
///
/// Dropping every sender ends the feed.
pub struct FeedSender<T> {
    tx: mpsc::UnboundedSender<Result<WatchEvent<T>, WatchError>>,
}

impl<T> Clone for FeedSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> FeedSender<T> {
    /// Returns false once the feed has been dropped
    pub fn send(&self, event: WatchEvent<T>) -> bool {
        self.tx.send(Ok(event)).is_ok()
    }

    /// Deliver an error to the consumer
    pub fn fail(&self, error: WatchError) -> bool {
        self.tx.send(Err(error)).is_ok()
    }
}

/// Feed whose events are pushed through a [`FeedSender`]
pub struct ChannelFeed<T> {
    rx: mpsc::UnboundedReceiver<Result<WatchEvent<T>, WatchError>>,
}

impl<T> ChannelFeed<T> {
    pub fn new() -> (FeedSender<T>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (FeedSender { tx }, Self { rx })
    }
}

#[async_trait]
impl<T: Send + 'static> WatchFeed<T> for ChannelFeed<T> {
    async fn next_event(&mut self) -> Result<Option<WatchEvent<T>>, WatchError> {
        self.rx.recv().await.transpose()
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
