// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake handler for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Handler, HandlerError};
use async_trait::async_trait;
use recon_core::ResourceKey;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded handler call
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerCall<T> {
    Settled { key: ResourceKey, object: T },
    Removed { key: ResourceKey },
}

impl<T> HandlerCall<T> {
    pub fn key(&self) -> &ResourceKey {
        match self {
            HandlerCall::Settled { key, .. } | HandlerCall::Removed { key } => key,
        }
    }
}

struct FakeState<T> {
    calls: Vec<HandlerCall<T>>,
    scripted: HashMap<ResourceKey, VecDeque<Result<(), HandlerError>>>,
    panic_on: HashSet<ResourceKey>,
    in_flight: HashSet<ResourceKey>,
    overlaps: usize,
}

impl<T> Default for FakeState<T> {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            scripted: HashMap::new(),
            panic_on: HashSet::new(),
            in_flight: HashSet::new(),
            overlaps: 0,
        }
    }
}

/// Fake handler that records calls and replays scripted results
///
/// Without a script every call succeeds. Clones share state.
pub struct FakeHandler<T> {
    state: Arc<Mutex<FakeState<T>>>,
    delay: Duration,
}

impl<T> Clone for FakeHandler<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            delay: self.delay,
        }
    }
}

impl<T> Default for FakeHandler<T> {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState::default())),
            delay: Duration::ZERO,
        }
    }
}

impl<T: Clone + Send + Sync + 'static> FakeHandler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long inside every call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queue a result for the next call on `key`
    pub fn push_result(&self, key: impl Into<ResourceKey>, result: Result<(), HandlerError>) {
        self.lock()
            .scripted
            .entry(key.into())
            .or_default()
            .push_back(result);
    }

    /// Panic whenever `key` is handled
    pub fn panic_on(&self, key: impl Into<ResourceKey>) {
        self.lock().panic_on.insert(key.into());
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<HandlerCall<T>> {
        self.lock().calls.clone()
    }

    /// Recorded calls for one key
    pub fn calls_for(&self, key: &str) -> Vec<HandlerCall<T>> {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.key().as_str() == key)
            .cloned()
            .collect()
    }

    /// Times a call started while another call for the same key was running
    pub fn overlaps(&self) -> usize {
        self.lock().overlaps
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState<T>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[allow(clippy::panic)]
    async fn record(&self, call: HandlerCall<T>) -> Result<(), HandlerError> {
        let key = call.key().clone();
        let (result, panics) = {
            let mut state = self.lock();
            if !state.in_flight.insert(key.clone()) {
                state.overlaps += 1;
            }
            state.calls.push(call);
            let result = state
                .scripted
                .get_mut(&key)
                .and_then(|results| results.pop_front())
                .unwrap_or(Ok(()));
            (result, state.panic_on.contains(&key))
        };

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.lock().in_flight.remove(&key);

        if panics {
            panic!("fake handler panic for {}", key);
        }
        result
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> Handler<T> for FakeHandler<T> {
    async fn on_settled(&self, key: &ResourceKey, object: &T) -> Result<(), HandlerError> {
        self.record(HandlerCall::Settled {
            key: key.clone(),
            object: object.clone(),
        })
        .await
    }

    async fn on_removed(&self, key: &ResourceKey) -> Result<(), HandlerError> {
        self.record(HandlerCall::Removed { key: key.clone() }).await
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
