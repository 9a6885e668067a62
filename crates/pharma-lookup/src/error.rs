//! Error types for lookup collaborators
//!
//! Every variant except [`LookupError::EntityNotFound`] means the call could
//! not complete, so existence is unknown.

use crate::query::LookupKind;

/// Lookup failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// Collaborator affirmatively reports no such entity
    #[error("{kind} '{id}' not found")]
    EntityNotFound {
        /// Entity kind
        kind: LookupKind,
        /// Identifier queried
        id: String,
    },

    /// Network error or unexpected server status
    #[error("transport failure: {0}")]
    Transport(String),

    /// Call did not complete in time
    #[error("lookup timed out after {after_ms}ms")]
    Timeout {
        /// Deadline that elapsed
        after_ms: u64,
    },

    /// Response could not be decoded
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Identifier empty after trimming
    #[error("empty identifier")]
    EmptyIdentifier,

    /// Collaborator misconfigured
    #[error("lookup configuration error: {0}")]
    Config(String),
}

impl LookupError {
    /// Diagnostic category of this failure
    #[inline]
    #[must_use]
    pub fn category(&self) -> FailureCategory {
        match self {
            Self::EntityNotFound { .. } => FailureCategory::EntityNotFound,
            Self::Transport(_) | Self::Timeout { .. } | Self::Malformed(_) | Self::Config(_) => {
                FailureCategory::TransportFailure
            }
            Self::EmptyIdentifier => FailureCategory::InvalidQuery,
        }
    }

    /// Whether the failure says anything definite about existence
    #[inline]
    #[must_use]
    pub fn is_conclusive(&self) -> bool {
        matches!(self, Self::EntityNotFound { .. })
    }
}

/// Failure taxonomy kept for telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    /// Entity does not exist
    EntityNotFound,
    /// Call could not complete
    TransportFailure,
    /// Query was never valid
    InvalidQuery,
}

impl FailureCategory {
    /// Stable name used in log fields
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EntityNotFound => "entity_not_found",
            Self::TransportFailure => "transport_failure",
            Self::InvalidQuery => "invalid_query",
        }
    }
}

impl std::fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_taxonomy() {
        let absent = LookupError::EntityNotFound {
            kind: LookupKind::Salesperson,
            id: "VE-99".into(),
        };
        assert_eq!(absent.category(), FailureCategory::EntityNotFound);
        assert!(absent.is_conclusive());

        for err in [
            LookupError::Transport("503".into()),
            LookupError::Timeout { after_ms: 10 },
            LookupError::Malformed("eof".into()),
        ] {
            assert_eq!(err.category(), FailureCategory::TransportFailure);
            assert!(!err.is_conclusive());
        }
    }

    #[test]
    fn display_names_entity() {
        let err = LookupError::EntityNotFound {
            kind: LookupKind::Product,
            id: "SKU-9".into(),
        };
        assert_eq!(err.to_string(), "product 'SKU-9' not found");
    }
}
