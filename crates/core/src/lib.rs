// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! recon-core: building blocks shared by the controller crates
//!
//! - Resource keys and the watched object model
//! - Watch events and the feed trait the informer consumes
//! - The deduplicating, rate-limited work queue
//! - Clock abstraction for cache bookkeeping
//! - The shutdown signal fanned out to every task

pub mod backoff;
pub mod clock;
pub mod key;
pub mod object;
pub mod queue;
pub mod shutdown;
pub mod watch;

pub use backoff::{BackoffConfig, ItemBackoff};
pub use clock::{Clock, FakeClock, SystemClock};
pub use key::{KeyError, ResourceKey};
pub use object::{Object, ObjectMeta, Resource};
pub use queue::WorkQueue;
pub use shutdown::{ShutdownSender, ShutdownSignal};
pub use watch::{WatchError, WatchEvent, WatchFeed};
