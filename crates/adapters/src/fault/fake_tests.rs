// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use recon_core::ResourceKey;

#[test]
fn fake_reporter_collects_faults_in_order() {
    let reporter = FakeFaultReporter::new();
    let shared = reporter.clone();

    shared.report(Fault::new(FaultKind::SyncAborted, "feed ended"));
    shared.report(Fault::for_key(
        FaultKind::RetriesExhausted,
        &ResourceKey::from("ns/a"),
        "lookup failed",
    ));

    assert_eq!(
        reporter.kinds(),
        vec![FaultKind::SyncAborted, FaultKind::RetriesExhausted]
    );
    assert_eq!(
        reporter.faults()[1].key.as_ref().map(|k| k.as_str()),
        Some("ns/a")
    );
}

#[test]
fn fault_display_includes_key_when_present() {
    let keyed = Fault::for_key(FaultKind::HandlerFailed, &ResourceKey::from("ns/a"), "boom");
    assert_eq!(keyed.to_string(), "handler_failed [ns/a]: boom");
    assert_eq!(
        Fault::new(FaultKind::Panicked, "worker").to_string(),
        "panicked: worker"
    );
}
