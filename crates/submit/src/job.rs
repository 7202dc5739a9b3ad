// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduled workflow submission

use crate::client::WorkflowClient;
use crate::error::SubmitError;
use crate::manifest::split_manifests;
use crate::params::apply_overrides;
use crate::workflow::{Parameter, Workflow};
use async_trait::async_trait;
use recon_adapters::{ScheduledTask, TaskError};
use std::path::PathBuf;

/// Submits the first workflow of a manifest file with parameter overrides
///
/// The manifest is re-read on every run, so edits take effect at the next
/// tick.
pub struct SubmitJob<C> {
    manifest: PathBuf,
    namespace: String,
    overrides: Vec<Parameter>,
    client: C,
}

impl<C: WorkflowClient> SubmitJob<C> {
    pub fn new(
        manifest: impl Into<PathBuf>,
        namespace: impl Into<String>,
        overrides: Vec<Parameter>,
        client: C,
    ) -> Self {
        Self {
            manifest: manifest.into(),
            namespace: namespace.into(),
            overrides,
            client,
        }
    }

    /// Read, override and submit once
    pub async fn submit(&self) -> Result<Workflow, SubmitError> {
        let body = tokio::fs::read_to_string(&self.manifest)
            .await
            .map_err(|source| SubmitError::Read {
                path: self.manifest.clone(),
                source,
            })?;
        let mut workflow = split_manifests(&body)
            .map_err(|source| SubmitError::Manifest {
                path: self.manifest.clone(),
                source,
            })?
            .into_iter()
            .next()
            .ok_or_else(|| SubmitError::NoWorkflow(self.manifest.clone()))?;

        let parameters = apply_overrides(&workflow.spec.arguments.parameters, &self.overrides);
        workflow.spec.arguments.parameters = parameters;

        let created = self.client.create(&self.namespace, &workflow).await?;
        tracing::info!(
            workflow = created.display_name(),
            namespace = %self.namespace,
            "workflow submitted"
        );
        Ok(created)
    }
}

#[async_trait]
impl<C: WorkflowClient> ScheduledTask for SubmitJob<C> {
    async fn run(&self) -> Result<(), TaskError> {
        self.submit().await.map(|_| ()).map_err(TaskError::failed)
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
