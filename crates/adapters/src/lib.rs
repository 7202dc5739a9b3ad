// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters at the edges of the controller: handlers, fault sinks,
//! scheduled tasks and watch feeds

pub mod fault;
pub mod feed;
pub mod handler;
pub mod task;
pub mod traced;

pub use fault::{Fault, FaultKind, FaultReporter, TracingFaultReporter};
pub use feed::{ChannelFeed, FeedSender, JsonLinesFeed};
pub use handler::{EchoHandler, Handler, HandlerError, NoOpHandler};
pub use task::{ScheduledTask, TaskError};
pub use traced::TracedHandler;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use fault::FakeFaultReporter;
#[cfg(any(test, feature = "test-support"))]
pub use handler::{FakeHandler, HandlerCall};
#[cfg(any(test, feature = "test-support"))]
pub use task::FakeTask;
