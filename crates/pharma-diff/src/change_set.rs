//! Change sets
//!
//! Built fresh on every submit and discarded once sent.

use crate::snapshot::{EntitySnapshot, Record};
use serde::Serialize;
use serde_json::Value;

/// Fields whose live value differs from the baseline
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChangeSet {
    fields: Record,
}

impl ChangeSet {
    /// Change set carrying every given field
    #[inline]
    #[must_use]
    pub fn from_record(fields: Record) -> Self {
        Self { fields }
    }

    /// Whether nothing changed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of changed fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// New value of a changed field
    #[inline]
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Whether a field changed
    #[inline]
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Names of changed fields
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Payload for the update request
    #[inline]
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Take the changed fields
    #[inline]
    #[must_use]
    pub fn into_record(self) -> Record {
        self.fields
    }

    /// Baseline with the changes applied
    #[must_use]
    pub fn apply_to(&self, baseline: &EntitySnapshot) -> Record {
        let mut merged = baseline.fields().clone();
        for (name, value) in &self.fields {
            merged.insert(name.clone(), value.clone());
        }
        merged
    }
}
