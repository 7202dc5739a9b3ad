// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watch feeds shipped with the controller

mod channel;
mod jsonl;

pub use channel::{ChannelFeed, FeedSender};
pub use jsonl::JsonLinesFeed;
