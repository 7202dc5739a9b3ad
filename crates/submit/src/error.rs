// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for manifest handling and submission

use std::path::PathBuf;
use thiserror::Error;

/// Errors parsing a multi-document manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("document {index}: {source}")]
    Parse {
        /// Position among the non-blank documents, from zero
        index: usize,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors from a submission attempt
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: ManifestError,
    },
    #[error("no workflow in {0}")]
    NoWorkflow(PathBuf),
    #[error("failed to render workflow: {0}")]
    Render(#[from] serde_yaml::Error),
    #[error("workflow rejected: {0}")]
    Rejected(String),
}
