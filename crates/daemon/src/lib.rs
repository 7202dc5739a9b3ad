// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! recond: runs the reconciliation controller over a JSON-lines watch feed

pub mod config;
pub mod lifecycle;
pub mod logging;

pub use config::{Config, ConfigError, ScheduleConfig};
pub use lifecycle::{build_scheduler, lock_state_dir, serve, LifecycleError, StateLock};
pub use logging::setup_logging;
