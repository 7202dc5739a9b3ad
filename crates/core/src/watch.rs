// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watch events and the feed that supplies them

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A change observed on the watched resource type
///
/// `Listed` carries a complete listing and replaces whatever was cached
/// before. The JSON form follows the watch API shape:
/// `{"type": "ADDED", "object": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "object", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WatchEvent<T> {
    Listed(Vec<T>),
    Added(T),
    Modified(T),
    Deleted(T),
}

impl<T> WatchEvent<T> {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            WatchEvent::Listed(_) => "listed",
            WatchEvent::Added(_) => "added",
            WatchEvent::Modified(_) => "modified",
            WatchEvent::Deleted(_) => "deleted",
        }
    }
}

/// Errors surfaced by a watch feed
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed event at line {line}: {source}")]
    Decode {
        line: u64,
        #[source]
        source: serde_json::Error,
    },
    #[error("watch disconnected: {0}")]
    Disconnected(String),
}

/// Source of watch events for one resource type
///
/// `Ok(None)` means the feed has ended and will produce nothing further.
/// An `Err` is treated as transient: the consumer logs it and asks again.
#[async_trait]
pub trait WatchFeed<T>: Send + 'static {
    async fn next_event(&mut self) -> Result<Option<WatchEvent<T>>, WatchError>;
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
