// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced handler wrapper for consistent observability

use crate::handler::{Handler, HandlerError};
use async_trait::async_trait;
use recon_core::ResourceKey;
use std::future::Future;
use std::time::Instant;
use tracing::Instrument;

/// Wrapper that adds a span and timing to any Handler
#[derive(Clone)]
pub struct TracedHandler<H> {
    inner: H,
}

impl<H> TracedHandler<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

async fn timed<F>(action: &'static str, call: F) -> Result<(), HandlerError>
where
    F: Future<Output = Result<(), HandlerError>>,
{
    tracing::debug!("starting");
    let start = Instant::now();
    let result = call.await;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    match &result {
        Ok(()) => tracing::info!(elapsed_ms, "{} ok", action),
        Err(e) if e.is_retryable() => {
            tracing::warn!(elapsed_ms, error = %e, "{} will retry", action)
        }
        Err(e) => tracing::error!(elapsed_ms, error = %e, "{} failed", action),
    }
    result
}

#[async_trait]
impl<T, H> Handler<T> for TracedHandler<H>
where
    T: Sync + 'static,
    H: Handler<T>,
{
    async fn on_settled(&self, key: &ResourceKey, object: &T) -> Result<(), HandlerError> {
        let span = tracing::info_span!("handler.settled", key = %key);
        timed("settled", self.inner.on_settled(key, object))
            .instrument(span)
            .await
    }

    async fn on_removed(&self, key: &ResourceKey) -> Result<(), HandlerError> {
        let span = tracing::info_span!("handler.removed", key = %key);
        timed("removed", self.inner.on_removed(key))
            .instrument(span)
            .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
