//! Lookup queries and results
//!
//! A [`LookupQuery`] is built once per validation attempt and never mutated.

use crate::error::LookupError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of entity a query refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    /// Salesperson looked up by employee identifier
    Salesperson,
    /// Product looked up by SKU
    Product,
}

impl LookupKind {
    /// Stable lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salesperson => "salesperson",
            Self::Product => "product",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LookupKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "salesperson" | "vendedor" => Ok(Self::Salesperson),
            "product" | "producto" => Ok(Self::Product),
            other => Err(format!("unknown lookup kind: {other}")),
        }
    }
}

/// Identifier plus kind, trimmed and guaranteed non-empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupQuery {
    kind: LookupKind,
    id: String,
}

impl LookupQuery {
    /// Build a query from raw field input
    ///
    /// # Errors
    /// Returns `LookupError::EmptyIdentifier` if the input is empty or whitespace-only
    pub fn new(kind: LookupKind, raw: &str) -> Result<Self, LookupError> {
        let id = raw.trim();
        if id.is_empty() {
            return Err(LookupError::EmptyIdentifier);
        }
        Ok(Self {
            kind,
            id: id.to_string(),
        })
    }

    /// Entity kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> LookupKind {
        self.kind
    }

    /// Trimmed identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for LookupQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Reference to an entity a collaborator confirmed exists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    /// Entity kind
    pub kind: LookupKind,
    /// Identifier the entity was found under
    pub id: String,
    /// Whatever the collaborator returned for the entity
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl EntityRef {
    /// Create reference without payload
    #[inline]
    #[must_use]
    pub fn new(kind: LookupKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            payload: serde_json::Value::Null,
        }
    }

    /// Attach payload
    #[inline]
    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Outcome of a lookup as seen by callers
///
/// Callers never learn why a lookup failed; absence and transport failure
/// both become [`LookupResult::NotFound`].
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    /// Entity exists
    Found(EntityRef),
    /// Entity absent or existence could not be confirmed
    NotFound,
}

impl LookupResult {
    /// Fold a collaborator result into the caller-facing outcome
    #[inline]
    #[must_use]
    pub fn collapse(result: Result<EntityRef, LookupError>) -> Self {
        match result {
            Ok(entity) => Self::Found(entity),
            Err(_) => Self::NotFound,
        }
    }

    /// Whether the entity was found
    #[inline]
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_trims_identifier() {
        let query = LookupQuery::new(LookupKind::Salesperson, "  VE-01  ").unwrap();
        assert_eq!(query.id(), "VE-01");
        assert_eq!(query.kind(), LookupKind::Salesperson);
        assert_eq!(query.to_string(), "salesperson:VE-01");
    }

    #[test]
    fn query_rejects_blank_identifier() {
        assert!(matches!(
            LookupQuery::new(LookupKind::Product, ""),
            Err(LookupError::EmptyIdentifier)
        ));
        assert!(matches!(
            LookupQuery::new(LookupKind::Product, " \t\n "),
            Err(LookupError::EmptyIdentifier)
        ));
    }

    #[test]
    fn kind_parses_domain_aliases() {
        assert_eq!("vendedor".parse::<LookupKind>(), Ok(LookupKind::Salesperson));
        assert_eq!("Product".parse::<LookupKind>(), Ok(LookupKind::Product));
        assert!("route".parse::<LookupKind>().is_err());
    }

    #[test]
    fn collapse_hides_failure_reason() {
        let not_found = LookupResult::collapse(Err(LookupError::EntityNotFound {
            kind: LookupKind::Product,
            id: "SKU-1".into(),
        }));
        let transport = LookupResult::collapse(Err(LookupError::Transport("reset".into())));
        assert_eq!(not_found, LookupResult::NotFound);
        assert_eq!(transport, LookupResult::NotFound);

        let found = LookupResult::collapse(Ok(EntityRef::new(LookupKind::Product, "SKU-1")));
        assert!(found.is_found());
    }
}
