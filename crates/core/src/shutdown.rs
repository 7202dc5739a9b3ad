// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cooperative shutdown signal shared by every long-running task

use tokio::sync::watch;

/// Sending `true` asks every holder of a receiver to stop
pub type ShutdownSender = watch::Sender<bool>;
pub type ShutdownSignal = watch::Receiver<bool>;

pub fn channel() -> (ShutdownSender, ShutdownSignal) {
    watch::channel(false)
}

/// Resolves once shutdown has been requested
///
/// A dropped sender never resolves: with nobody left to signal, the holder
/// keeps running until its own work ends.
pub async fn signalled(signal: &mut ShutdownSignal) {
    let closed = signal.wait_for(|down| *down).await.is_err();
    if closed {
        std::future::pending::<()>().await;
    }
}

/// Non-blocking check
pub fn requested(signal: &ShutdownSignal) -> bool {
    *signal.borrow()
}
