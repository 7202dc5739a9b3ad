// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `name=value` parameter overrides

use crate::workflow::Parameter;
use std::collections::HashSet;

/// Parse `name=value`, splitting at the first `=`
///
/// Returns `None` when there is no `=`.
pub fn parse_parameter(raw: &str) -> Option<Parameter> {
    let (name, value) = raw.split_once('=')?;
    Some(Parameter::new(name, value))
}

/// Parse every entry, silently dropping the ones without `=`
pub fn parse_parameters<S: AsRef<str>>(raw: &[S]) -> Vec<Parameter> {
    raw.iter()
        .filter_map(|entry| {
            let parsed = parse_parameter(entry.as_ref());
            if parsed.is_none() {
                tracing::debug!(entry = entry.as_ref(), "ignoring parameter without '='");
            }
            parsed
        })
        .collect()
}

/// Overrides first, in the order given, then template parameters that
/// were not overridden
pub fn apply_overrides(template: &[Parameter], overrides: &[Parameter]) -> Vec<Parameter> {
    let overridden: HashSet<&str> = overrides.iter().map(|p| p.name.as_str()).collect();
    overrides
        .iter()
        .cloned()
        .chain(
            template
                .iter()
                .filter(|p| !overridden.contains(p.name.as_str()))
                .cloned(),
        )
        .collect()
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
