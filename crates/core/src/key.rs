// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource keys in `namespace/name` form

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from splitting a key into namespace and name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("empty resource key")]
    Empty,
    #[error("unexpected key format: {0:?}")]
    Malformed(String),
}

/// Identifies an object within its namespace
///
/// Cluster-scoped objects have no namespace and their key is just the name.
/// The same key is reused if an object is deleted and created again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceKey(String);

impl ResourceKey {
    /// Build a key from an optional namespace and a name
    pub fn new(namespace: Option<&str>, name: &str) -> Self {
        match namespace {
            Some(ns) if !ns.is_empty() => Self(format!("{}/{}", ns, name)),
            _ => Self(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into `(namespace, name)`
    pub fn split(&self) -> Result<(Option<&str>, &str), KeyError> {
        if self.0.is_empty() {
            return Err(KeyError::Empty);
        }
        let mut parts = self.0.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), None, None) => Ok((None, name)),
            (Some(ns), Some(name), None) if !ns.is_empty() && !name.is_empty() => {
                Ok((Some(ns), name))
            }
            _ => Err(KeyError::Malformed(self.0.clone())),
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ResourceKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ResourceKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
