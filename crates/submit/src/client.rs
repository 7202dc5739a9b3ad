// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow submission clients

use crate::error::SubmitError;
use crate::workflow::Workflow;
use async_trait::async_trait;

/// Creates workflows in a namespace
#[async_trait]
pub trait WorkflowClient: Send + Sync + 'static {
    /// Submit `workflow`; returns it as accepted
    async fn create(&self, namespace: &str, workflow: &Workflow) -> Result<Workflow, SubmitError>;
}

/// Client that renders the workflow to the log instead of submitting it
#[derive(Clone, Copy, Debug, Default)]
pub struct DryRunClient;

impl DryRunClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WorkflowClient for DryRunClient {
    async fn create(&self, namespace: &str, workflow: &Workflow) -> Result<Workflow, SubmitError> {
        let mut accepted = workflow.clone();
        accepted.metadata.namespace = Some(namespace.to_string());
        let rendered = serde_yaml::to_string(&accepted)?;
        tracing::info!(
            namespace,
            workflow = accepted.display_name(),
            "dry run, not submitting:\n{}",
            rendered
        );
        Ok(accepted)
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeWorkflowClient;

#[cfg(any(test, feature = "test-support"))]
mod fake {
    #![cfg_attr(coverage_nightly, coverage(off))]

    use super::{SubmitError, Workflow, WorkflowClient};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct FakeState {
        created: Vec<(String, Workflow)>,
        reject: Option<String>,
    }

    /// Fake client that records submissions
    #[derive(Clone, Default)]
    pub struct FakeWorkflowClient {
        state: Arc<Mutex<FakeState>>,
    }

    impl FakeWorkflowClient {
        pub fn new() -> Self {
            Self::default()
        }

        /// Reject every submission with `reason`
        pub fn reject_with(&self, reason: impl Into<String>) {
            self.lock().reject = Some(reason.into());
        }

        /// Submitted workflows with their namespaces
        pub fn created(&self) -> Vec<(String, Workflow)> {
            self.lock().created.clone()
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
            self.state.lock().unwrap_or_else(|e| e.into_inner())
        }
    }

    #[async_trait]
    impl WorkflowClient for FakeWorkflowClient {
        async fn create(
            &self,
            namespace: &str,
            workflow: &Workflow,
        ) -> Result<Workflow, SubmitError> {
            let mut state = self.lock();
            if let Some(reason) = &state.reject {
                return Err(SubmitError::Rejected(reason.clone()));
            }
            state
                .created
                .push((namespace.to_string(), workflow.clone()));
            Ok(workflow.clone())
        }
    }
}
