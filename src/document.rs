//! The results document written by the nightly sanity runner.
//!
//! The document is kept as an untyped JSON tree. Nothing about its shape is
//! validated up front; every read goes through [`ResultsDocument::cell`],
//! which degrades to an empty string when any segment of a key path is absent.

use std::fs;
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::errors::ReportError;

/// A parsed, read-only results document.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsDocument {
    root: Value,
}

impl ResultsDocument {
    /// Parses `source` as JSON. `name` identifies the source in diagnostics.
    pub fn parse(source: &str, name: &str) -> Result<Self, ReportError> {
        let root =
            serde_json::from_str(source).map_err(|e| ReportError::parse(name, source, &e))?;
        Ok(Self { root })
    }

    /// Reads and parses the results document at `path`.
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let source = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        debug!("loaded results document {} ({} bytes)", path.display(), source.len());
        Self::parse(&source, &path.display().to_string())
    }

    /// Wraps an already deserialized JSON tree.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Walks `path` through nested objects. Returns `None` as soon as a key is
    /// missing or an intermediate value is not an object.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let mut current = &self.root;
        for key in path {
            match current {
                Value::Object(map) => current = map.get(*key)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Safe lookup: the display form of the value at `path`, or an empty
    /// string if nothing is stored there.
    pub fn cell(&self, path: &[&str]) -> String {
        match self.lookup(path) {
            Some(value) => display_value(value),
            None => String::new(),
        }
    }
}

/// Best-effort human readable form of a JSON value. Never fails.
///
/// Strings are shown verbatim and `null` as nothing. Arrays and objects are
/// flattened to a comma separated list so an unexpected structure still
/// shows up in the report instead of being dropped.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}: {}", k, display_value(v)))
            .collect::<Vec<_>>()
            .join(", "),
    }
}
