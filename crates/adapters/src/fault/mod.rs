// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fault reporting
//!
//! Faults are the failures an operator should see: dropped keys, aborted
//! startups, panics. They go to an injected reporter instead of a global.

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeFaultReporter;

use recon_core::ResourceKey;
use std::fmt;

/// What went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// A key failed `max_retries` times and was dropped
    RetriesExhausted,
    /// A handler returned a non-retryable error
    HandlerFailed,
    /// The controller stopped before the cache synced
    SyncAborted,
    /// A task panicked
    Panicked,
    /// A scheduled task returned an error
    TaskFailed,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FaultKind::RetriesExhausted => "retries_exhausted",
            FaultKind::HandlerFailed => "handler_failed",
            FaultKind::SyncAborted => "sync_aborted",
            FaultKind::Panicked => "panicked",
            FaultKind::TaskFailed => "task_failed",
        };
        f.write_str(name)
    }
}

/// A reportable failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub kind: FaultKind,
    /// Key being processed, if the fault concerns one
    pub key: Option<ResourceKey>,
    pub message: String,
}

impl Fault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            key: None,
            message: message.into(),
        }
    }

    pub fn for_key(kind: FaultKind, key: &ResourceKey, message: impl Into<String>) -> Self {
        Self {
            kind,
            key: Some(key.clone()),
            message: message.into(),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{} [{}]: {}", self.kind, key, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

/// Sink for faults
pub trait FaultReporter: Send + Sync + 'static {
    fn report(&self, fault: Fault);
}

/// Reports faults as `error`-level tracing events
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingFaultReporter;

impl TracingFaultReporter {
    pub fn new() -> Self {
        Self
    }
}

impl FaultReporter for TracingFaultReporter {
    fn report(&self, fault: Fault) {
        tracing::error!(
            kind = %fault.kind,
            key = fault.key.as_ref().map(|k| k.as_str()),
            "{}",
            fault.message
        );
    }
}
