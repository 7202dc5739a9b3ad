// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake fault reporter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Fault, FaultKind, FaultReporter};
use std::sync::{Arc, Mutex};

/// Collects every reported fault
#[derive(Clone, Default)]
pub struct FakeFaultReporter {
    faults: Arc<Mutex<Vec<Fault>>>,
}

impl FakeFaultReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all reported faults
    pub fn faults(&self) -> Vec<Fault> {
        self.faults.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Kinds of the reported faults, in order
    pub fn kinds(&self) -> Vec<FaultKind> {
        self.faults().into_iter().map(|f| f.kind).collect()
    }
}

impl FaultReporter for FakeFaultReporter {
    fn report(&self, fault: Fault) {
        self.faults
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(fault);
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
