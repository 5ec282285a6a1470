//! Attribute-path filtering over serialized catalog items
//!
//! A filter is a dot-separated attribute path, an operator, and a value.
//! Items are matched against their JSON form, so the path names the wire
//! fields (e.g. `meta.manufacturer`, `resources.name`). Traversal fans out
//! over arrays: a path segment applied to an array applies to every element,
//! and the item matches if any leaf does.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::{FedcatError, Result};

/// Comparison operator of a path filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Equals,
    Prefix,
    Suffix,
    Contains,
}

impl FilterOp {
    fn compare(self, leaf: &str, value: &str) -> bool {
        match self {
            FilterOp::Equals => leaf == value,
            FilterOp::Prefix => leaf.starts_with(value),
            FilterOp::Suffix => leaf.ends_with(value),
            FilterOp::Contains => leaf.contains(value),
        }
    }
}

impl FromStr for FilterOp {
    type Err = FedcatError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "equals" => Ok(FilterOp::Equals),
            "prefix" => Ok(FilterOp::Prefix),
            "suffix" => Ok(FilterOp::Suffix),
            "contains" => Ok(FilterOp::Contains),
            _ => Err(FedcatError::UnknownFilterOp { op: s.to_string() }),
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterOp::Equals => "equals",
            FilterOp::Prefix => "prefix",
            FilterOp::Suffix => "suffix",
            FilterOp::Contains => "contains",
        };
        f.write_str(name)
    }
}

/// Match a serializable item against a path filter
pub fn matches<T: Serialize>(item: &T, path: &str, op: FilterOp, value: &str) -> bool {
    match serde_json::to_value(item) {
        Ok(json) => leaves(&json, path)
            .iter()
            .any(|leaf| op.compare(leaf, value)),
        Err(_) => false,
    }
}

/// Collect the string forms of all leaves the path resolves to
fn leaves(json: &Value, path: &str) -> Vec<String> {
    let mut current = vec![json];
    for segment in path.split('.') {
        let mut next = Vec::new();
        for value in current {
            descend(value, segment, &mut next);
        }
        if next.is_empty() {
            return Vec::new();
        }
        current = next;
    }
    current.iter().flat_map(|v| leaf_strings(v)).collect()
}

/// String forms of a resolved leaf; a terminal array fans out to its
/// scalar elements
fn leaf_strings(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(leaf_string).collect(),
        other => leaf_string(other).into_iter().collect(),
    }
}

fn descend<'a>(value: &'a Value, segment: &str, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            if let Some(v) = map.get(segment) {
                out.push(v);
            }
        }
        Value::Array(items) => {
            for item in items {
                descend(item, segment, out);
            }
        }
        _ => {}
    }
}

fn leaf_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
