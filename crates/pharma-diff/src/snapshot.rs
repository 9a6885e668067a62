//! Entity snapshots
//!
//! A snapshot is captured once when an entity is loaded for editing and is
//! never mutated afterwards; only a fresh load replaces it.

use crate::error::DiffError;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Field-name to value mapping
pub type Record = serde_json::Map<String, Value>;

/// Immutable baseline copy of a previously fetched entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot {
    fields: Arc<Record>,
}

impl EntitySnapshot {
    /// Capture a snapshot from a field record
    #[inline]
    #[must_use]
    pub fn from_record(fields: Record) -> Self {
        Self {
            fields: Arc::new(fields),
        }
    }

    /// Capture a snapshot from a JSON value
    ///
    /// # Errors
    /// Returns `DiffError::NotAnObject` unless the value is an object
    pub fn from_value(value: Value) -> Result<Self, DiffError> {
        into_record(value).map(Self::from_record)
    }

    /// Capture a snapshot of a serializable entity
    ///
    /// # Errors
    /// Returns error if the entity fails to serialize or is not a struct/map
    pub fn from_entity<T: Serialize>(entity: &T) -> Result<Self, DiffError> {
        to_record(entity).map(Self::from_record)
    }

    /// Baseline value of a field
    #[inline]
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// All baseline fields
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &Record {
        &self.fields
    }

    /// Number of fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the snapshot has no fields
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Serialize an entity into a field record
///
/// # Errors
/// Returns error if the entity fails to serialize or is not a struct/map
pub fn to_record<T: Serialize>(entity: &T) -> Result<Record, DiffError> {
    into_record(serde_json::to_value(entity)?)
}

fn into_record(value: Value) -> Result<Record, DiffError> {
    match value {
        Value::Object(fields) => Ok(fields),
        other => Err(DiffError::NotAnObject {
            found: json_type(&other),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
