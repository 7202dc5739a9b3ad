// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Feed that decodes one JSON watch event per line
//!
//! Blank lines are skipped. A line that fails to decode is surfaced as
//! `WatchError::Decode` and the feed moves on to the next line.

use async_trait::async_trait;
use recon_core::{WatchError, WatchEvent, WatchFeed};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

pub struct JsonLinesFeed<T, R> {
    lines: Lines<R>,
    line: u64,
    _object: PhantomData<fn() -> T>,
}

impl<T, R: AsyncBufRead + Unpin> JsonLinesFeed<T, R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            _object: PhantomData,
        }
    }
}

impl<T> JsonLinesFeed<T, BufReader<tokio::fs::File>> {
    pub async fn open(path: &Path) -> Result<Self, WatchError> {
        let file = tokio::fs::File::open(path).await?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<T> JsonLinesFeed<T, BufReader<tokio::io::Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

#[async_trait]
impl<T, R> WatchFeed<T> for JsonLinesFeed<T, R>
where
    T: DeserializeOwned + Send + 'static,
    R: AsyncBufRead + Unpin + Send + 'static,
{
    async fn next_event(&mut self) -> Result<Option<WatchEvent<T>>, WatchError> {
        // `next_line` is cancel safe, so a partially read line survives a
        // cancelled call.
        loop {
            let next = self.lines.next_line().await;
            if !matches!(next, Ok(None)) {
                self.line += 1;
            }
            let Some(text) = next? else {
                return Ok(None);
            };
            if text.trim().is_empty() {
                continue;
            }
            return serde_json::from_str(&text)
                .map(Some)
                .map_err(|source| WatchError::Decode {
                    line: self.line,
                    source,
                });
        }
    }
}

#[cfg(test)]
#[path = "jsonl_tests.rs"]
mod tests;
