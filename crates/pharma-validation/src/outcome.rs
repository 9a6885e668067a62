//! Field-level validation outcomes
//!
//! An outcome renders either as `null` (valid) or as
//! `{ "<reasonCode>": { "value": "<trimmed input>" } }`, the shape form
//! layers attach to a control.

use pharma_lookup::LookupKind;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::fmt;

/// Why a field failed existence validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonCode {
    /// Referenced salesperson does not exist
    #[serde(rename = "vendedorNotExists")]
    SalespersonNotExists,
    /// Referenced product does not exist
    #[serde(rename = "productoNotExists")]
    ProductNotExists,
}

impl ReasonCode {
    /// Reason code reported for a lookup kind
    #[inline]
    #[must_use]
    pub fn for_kind(kind: LookupKind) -> Self {
        match kind {
            LookupKind::Salesperson => Self::SalespersonNotExists,
            LookupKind::Product => Self::ProductNotExists,
        }
    }

    /// Key under which the error is reported
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SalespersonNotExists => "vendedorNotExists",
            Self::ProductNotExists => "productoNotExists",
        }
    }

    /// Fixed user-facing message
    #[inline]
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::SalespersonNotExists => "the salesperson does not exist in the system",
            Self::ProductNotExists => "the product does not exist in the system",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result attached to a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// No error
    Valid,
    /// Referenced entity does not exist, or existence could not be confirmed
    Invalid {
        /// Reason code for the field kind
        reason: ReasonCode,
        /// Trimmed input that was checked
        value: String,
    },
}

impl FieldOutcome {
    /// Invalid outcome for a reason and trimmed value
    #[inline]
    #[must_use]
    pub fn invalid(reason: ReasonCode, value: impl Into<String>) -> Self {
        Self::Invalid {
            reason,
            value: value.into(),
        }
    }

    /// Whether the field passed
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Error object for the form layer, `None` when valid
    #[must_use]
    pub fn to_errors(&self) -> Option<Value> {
        match self {
            Self::Valid => None,
            Self::Invalid { reason, value } => {
                let mut errors = Map::new();
                errors.insert(reason.as_str().to_string(), json!({ "value": value }));
                Some(Value::Object(errors))
            }
        }
    }
}

impl Serialize for FieldOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_errors().serialize(serializer)
    }
}

/// Validation state of a field over time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldState {
    /// Debounce or lookup still running
    Pending,
    /// Outcome known for the current value
    Settled(FieldOutcome),
}

impl FieldState {
    /// Whether an outcome is still outstanding
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Settled outcome, if any
    #[inline]
    #[must_use]
    pub fn outcome(&self) -> Option<&FieldOutcome> {
        match self {
            Self::Pending => None,
            Self::Settled(outcome) => Some(outcome),
        }
    }
}

impl Default for FieldState {
    fn default() -> Self {
        Self::Settled(FieldOutcome::Valid)
    }
}
