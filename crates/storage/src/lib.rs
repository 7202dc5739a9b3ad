// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Resource cache: the indexed store and the informer that feeds it

mod informer;
mod store;

pub use informer::{Informer, InformerConfig, InformerExit};
pub use store::{CacheEntry, Store, StoreError, NAMESPACE_INDEX};
