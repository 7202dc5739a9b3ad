// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Workflow submission: manifests, parameter overrides and the scheduled
//! job that submits them

mod client;
mod error;
mod job;
mod manifest;
mod params;
mod workflow;

pub use client::{DryRunClient, WorkflowClient};
pub use error::{ManifestError, SubmitError};
pub use job::SubmitJob;
pub use manifest::split_manifests;
pub use params::{apply_overrides, parse_parameter, parse_parameters};
pub use workflow::{Arguments, Parameter, Workflow, WorkflowMeta, WorkflowSpec};

#[cfg(any(test, feature = "test-support"))]
pub use client::FakeWorkflowClient;
