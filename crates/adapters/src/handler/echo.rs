// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler that writes one line per reconcile

use super::{Handler, HandlerError};
use async_trait::async_trait;
use recon_core::ResourceKey;
use std::io::Write;
use std::sync::Mutex;

/// Writes `settled <key>` or `removed <key>` to the wrapped writer
pub struct EchoHandler<W> {
    out: Mutex<W>,
}

impl<W: Write + Send + 'static> EchoHandler<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consume the handler and return the writer
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn line(&self, verb: &str, key: &ResourceKey) -> Result<(), HandlerError> {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(out, "{} {}", verb, key)
            .and_then(|()| out.flush())
            .map_err(HandlerError::retry)
    }
}

impl EchoHandler<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

#[async_trait]
impl<T, W> Handler<T> for EchoHandler<W>
where
    T: Sync + 'static,
    W: Write + Send + 'static,
{
    async fn on_settled(&self, key: &ResourceKey, _object: &T) -> Result<(), HandlerError> {
        self.line("settled", key)
    }

    async fn on_removed(&self, key: &ResourceKey) -> Result<(), HandlerError> {
        self.line("removed", key)
    }
}

#[cfg(test)]
#[path = "echo_tests.rs"]
mod tests;
