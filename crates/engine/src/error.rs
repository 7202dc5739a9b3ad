// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the controller and scheduler

use thiserror::Error;

/// Reasons a controller run ends abnormally
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// The cache never synced, so no worker was started
    #[error("cache sync aborted: {0}")]
    SyncAborted(String),
    #[error("controller task panicked: {0}")]
    Panicked(String),
}

/// Errors registering scheduled tasks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("task {0} has a zero interval")]
    ZeroInterval(String),
    #[error("task already registered: {0}")]
    Duplicate(String),
}

/// Best-effort text of a panic payload
pub(crate) fn panic_message(err: tokio::task::JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
