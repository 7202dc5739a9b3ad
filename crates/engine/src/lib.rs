// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Reconciliation engine: workers, controller lifecycle and the scheduler

mod controller;
mod error;
mod scheduler;
mod worker;

pub use controller::{Controller, ControllerConfig, ControllerDeps};
pub use error::{ControllerError, SchedulerError};
pub use scheduler::Scheduler;
pub use worker::{ItemOutcome, Lookup, Worker};
