// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconcile handlers
//!
//! A handler is told one of two things about a key: here is the current
//! object, or the object is gone. It never sees raw watch events.

mod echo;

pub use echo::EchoHandler;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeHandler, HandlerCall};

use async_trait::async_trait;
use recon_core::ResourceKey;
use thiserror::Error;

/// Errors returned by a handler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// Transient failure; the key is retried with backoff
    #[error("retry requested: {0}")]
    Retry(String),
    /// Permanent failure; the key is dropped and reported
    #[error("handler failed: {0}")]
    Failed(String),
}

impl HandlerError {
    pub fn retry(reason: impl std::fmt::Display) -> Self {
        Self::Retry(reason.to_string())
    }

    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self::Failed(reason.to_string())
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Retry(_))
    }
}

/// Business logic invoked for each reconciled key
#[async_trait]
pub trait Handler<T>: Send + Sync + 'static {
    /// The object exists; `object` is its latest cached state
    async fn on_settled(&self, key: &ResourceKey, object: &T) -> Result<(), HandlerError>;

    /// The object is gone from the cache
    async fn on_removed(&self, key: &ResourceKey) -> Result<(), HandlerError>;
}

/// Handler that accepts everything and does nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpHandler;

impl NoOpHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl<T: Sync + 'static> Handler<T> for NoOpHandler {
    async fn on_settled(&self, _key: &ResourceKey, _object: &T) -> Result<(), HandlerError> {
        Ok(())
    }

    async fn on_removed(&self, _key: &ResourceKey) -> Result<(), HandlerError> {
        Ok(())
    }
}
