// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Multi-document manifest splitting

use crate::error::ManifestError;
use crate::workflow::Workflow;
use regex::Regex;
use std::sync::LazyLock;

// Document separator: `---` at the start of a line
#[allow(clippy::expect_used)]
static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n---").expect("constant regex pattern is valid"));

/// Split `body` into workflows, one per YAML document
///
/// Blank documents are skipped. The first document that fails to parse
/// aborts the split.
pub fn split_manifests(body: &str) -> Result<Vec<Workflow>, ManifestError> {
    SEPARATOR
        .split(body)
        .filter(|doc| !doc.trim().is_empty())
        .enumerate()
        .map(|(index, doc)| {
            serde_yaml::from_str(doc).map_err(|source| ManifestError::Parse { index, source })
        })
        .collect()
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
