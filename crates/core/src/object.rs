// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watched object model

use crate::key::ResourceKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata shared by every watched object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl ObjectMeta {
    pub fn new(namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_resource_version(mut self, version: impl Into<String>) -> Self {
        self.resource_version = Some(version.into());
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }
}

/// A resource type the controller can cache and dispatch
pub trait Object: Clone + Send + Sync + 'static {
    fn meta(&self) -> &ObjectMeta;

    fn key(&self) -> ResourceKey {
        let meta = self.meta();
        ResourceKey::new(meta.namespace.as_deref(), &meta.name)
    }
}

/// Dynamically typed resource with a free-form spec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<serde_json::Value>,
}

impl Resource {
    pub fn new(metadata: ObjectMeta) -> Self {
        Self {
            metadata,
            spec: serde_json::Value::Null,
            status: None,
        }
    }

    pub fn with_spec(mut self, spec: serde_json::Value) -> Self {
        self.spec = spec;
        self
    }
}

impl Object for Resource {
    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }
}
