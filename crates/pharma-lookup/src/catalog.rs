//! In-memory lookup collaborator
//!
//! Concurrent map keyed by `(kind, id)`.

use crate::error::LookupError;
use crate::query::{EntityRef, LookupKind, LookupQuery};
use crate::Lookup;
use async_trait::async_trait;
use dashmap::DashMap;

/// Concurrent in-process catalog of known entities
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    entries: DashMap<(LookupKind, String), serde_json::Value>,
}

impl InMemoryCatalog {
    /// Create empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity, replacing any previous payload
    pub fn insert(&self, kind: LookupKind, id: impl Into<String>, payload: serde_json::Value) {
        self.entries.insert((kind, id.into()), payload);
    }

    /// Remove an entity, returning whether it was present
    pub fn remove(&self, kind: LookupKind, id: &str) -> bool {
        self.entries.remove(&(kind, id.to_string())).is_some()
    }

    /// Number of registered entities
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entity is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl Lookup for InMemoryCatalog {
    async fn lookup(&self, query: &LookupQuery) -> Result<EntityRef, LookupError> {
        self.entries
            .get(&(query.kind(), query.id().to_string()))
            .map(|entry| EntityRef::new(query.kind(), query.id()).with_payload(entry.value().clone()))
            .ok_or_else(|| LookupError::EntityNotFound {
                kind: query.kind(),
                id: query.id().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn lookup_finds_registered_entity() {
        let catalog = InMemoryCatalog::new();
        catalog.insert(LookupKind::Product, "SKU-1", json!({ "name": "Ibuprofeno" }));

        let query = LookupQuery::new(LookupKind::Product, "SKU-1").unwrap();
        let found = catalog.lookup(&query).await.unwrap();

        assert_eq!(found.id, "SKU-1");
        assert_eq!(found.payload["name"], "Ibuprofeno");
    }

    #[tokio::test]
    async fn lookup_separates_kinds() {
        let catalog = InMemoryCatalog::new();
        catalog.insert(LookupKind::Product, "X-1", json!({}));

        let query = LookupQuery::new(LookupKind::Salesperson, "X-1").unwrap();
        let result = catalog.lookup(&query).await;

        assert!(matches!(result, Err(LookupError::EntityNotFound { .. })));
    }

    #[tokio::test]
    async fn removed_entity_is_not_found() {
        let catalog = InMemoryCatalog::new();
        catalog.insert(LookupKind::Salesperson, "VE-01", json!({}));
        assert_eq!(catalog.len(), 1);

        assert!(catalog.remove(LookupKind::Salesperson, "VE-01"));
        assert!(catalog.is_empty());

        let query = LookupQuery::new(LookupKind::Salesperson, "VE-01").unwrap();
        assert!(catalog.lookup(&query).await.is_err());
    }
}
