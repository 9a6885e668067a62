//! Testing utilities for the pharma console workspace
//!
//! Shared scripted collaborators and domain fixtures.

#![allow(missing_docs)]

use async_trait::async_trait;
use dashmap::DashMap;
use pharma_lookup::{EntityRef, Lookup, LookupError, LookupQuery};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Scripted {
    Found(serde_json::Value),
    Fail(LookupError),
}

#[derive(Debug, Clone)]
struct Script {
    response: Scripted,
    latency: Duration,
}

/// Lookup collaborator answering from a script and recording every call
///
/// Identifiers without a script resolve as not found.
#[derive(Debug, Default)]
pub struct ScriptedLookup {
    scripts: DashMap<String, Script>,
    calls: Mutex<Vec<LookupQuery>>,
}

impl ScriptedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn found(self, id: &str) -> Self {
        self.script(id, Scripted::Found(json!({ "id": id })), Duration::ZERO)
    }

    pub fn failing(self, id: &str) -> Self {
        self.script(
            id,
            Scripted::Fail(LookupError::Transport("503 service unavailable".into())),
            Duration::ZERO,
        )
    }

    pub fn found_after(self, id: &str, latency: Duration) -> Self {
        self.script(id, Scripted::Found(json!({ "id": id })), latency)
    }

    pub fn missing_after(self, id: &str, latency: Duration) -> Self {
        self.script(
            id,
            Scripted::Fail(LookupError::EntityNotFound {
                kind: pharma_lookup::LookupKind::Salesperson,
                id: id.to_string(),
            }),
            latency,
        )
    }

    pub fn script(self, id: &str, response: Scripted, latency: Duration) -> Self {
        self.scripts
            .insert(id.to_string(), Script { response, latency });
        self
    }

    /// Identifiers looked up so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().iter().map(|q| q.id().to_string()).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl Lookup for ScriptedLookup {
    async fn lookup(&self, query: &LookupQuery) -> Result<EntityRef, LookupError> {
        self.calls.lock().push(query.clone());

        let script = self.scripts.get(query.id()).map(|s| s.value().clone());
        let Some(script) = script else {
            return Err(LookupError::EntityNotFound {
                kind: query.kind(),
                id: query.id().to_string(),
            });
        };

        if !script.latency.is_zero() {
            tokio::time::sleep(script.latency).await;
        }

        match script.response {
            Scripted::Found(payload) => {
                Ok(EntityRef::new(query.kind(), query.id()).with_payload(payload))
            }
            Scripted::Fail(LookupError::EntityNotFound { id, .. }) => {
                Err(LookupError::EntityNotFound {
                    kind: query.kind(),
                    id,
                })
            }
            Scripted::Fail(err) => Err(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConditions {
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub refrigerated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub active: bool,
    pub supplier_id: Option<String>,
    pub storage_conditions: StorageConditions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesGoal {
    pub id: u64,
    pub salesperson_id: String,
    pub product_sku: String,
    pub target_units: u32,
    pub period: String,
}

pub fn sample_product() -> Product {
    Product {
        sku: "SKU-1".to_string(),
        name: "Paracetamol 500mg".to_string(),
        price: 10.0,
        stock: 120,
        active: true,
        supplier_id: Some("SUP-7".to_string()),
        storage_conditions: StorageConditions {
            min_temp_c: 15.0,
            max_temp_c: 25.0,
            refrigerated: false,
        },
    }
}

pub fn sample_sales_goal() -> SalesGoal {
    SalesGoal {
        id: 42,
        salesperson_id: "VE-01".to_string(),
        product_sku: "SKU-1".to_string(),
        target_units: 500,
        period: "2026-Q4".to_string(),
    }
}
