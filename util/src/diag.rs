//! Flat key/value diagnostics
//!
//! Modules publish a snapshot of named scalars once per tick. Keys are
//! `/`-separated paths such as `VisionDriveAssist/curvature`; a later `put`
//! to the same key overwrites the earlier value, nothing is kept across
//! ticks beyond the latest value.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A single diagnostic value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DiagValue {
    Number(f64),
    Bool(bool),
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A sink receiving diagnostics.
pub trait DiagSink {
    /// Publish a value under the given key.
    fn put(&mut self, key: &str, value: DiagValue);

    fn put_f64(&mut self, key: &str, value: f64) {
        self.put(key, DiagValue::Number(value))
    }

    fn put_bool(&mut self, key: &str, value: bool) {
        self.put(key, DiagValue::Bool(value))
    }
}

/// Anything which can write its diagnostics into a sink.
pub trait DiagSource {
    fn log(&self, sink: &mut dyn DiagSink);
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// In-memory diagnostics table holding the latest value of every key.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct DiagTable {
    entries: BTreeMap<String, DiagValue>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DiagTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<DiagValue> {
        self.entries.get(key).copied()
    }

    /// Get a numeric value, `None` if absent or boolean.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.get(key) {
            Some(DiagValue::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Get a boolean value, `None` if absent or numeric.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(DiagValue::Bool(b)) => Some(b),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, DiagValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Render the table as a JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl DiagSink for DiagTable {
    fn put(&mut self, key: &str, value: DiagValue) {
        match self.entries.get_mut(key) {
            Some(v) => *v = value,
            None => {
                self.entries.insert(key.to_string(), value);
            }
        }
    }
}
