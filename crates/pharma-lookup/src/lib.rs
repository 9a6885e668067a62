//! Pharma Lookup
//!
//! The collaborator boundary that answers "does entity X with identifier Y exist?".
//!
//! # Overview
//!
//! - **LookupQuery**: trimmed, non-empty identifier plus the kind of entity
//! - **Lookup**: async trait implemented by every collaborator
//! - **InMemoryCatalog**: concurrent in-process collaborator
//! - **HttpLookup**: collaborator backed by the remote catalog/sales service
//! - **TimeoutLookup**: bounds any collaborator with an explicit deadline
//!
//! # Example
//!
//! ```rust
//! use pharma_lookup::{InMemoryCatalog, Lookup, LookupKind, LookupQuery};
//!
//! # async fn example() -> Result<(), pharma_lookup::LookupError> {
//! let catalog = InMemoryCatalog::new();
//! catalog.insert(LookupKind::Salesperson, "VE-01", serde_json::json!({ "name": "Ana" }));
//!
//! let query = LookupQuery::new(LookupKind::Salesperson, "  VE-01 ")?;
//! let found = catalog.lookup(&query).await?;
//! assert_eq!(found.id, "VE-01");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod http;
pub mod query;
pub mod timeout;

// Re-exports
pub use catalog::InMemoryCatalog;
pub use error::{FailureCategory, LookupError};
pub use http::{HttpLookup, HttpLookupConfig};
pub use query::{EntityRef, LookupKind, LookupQuery, LookupResult};
pub use timeout::TimeoutLookup;

use async_trait::async_trait;
use std::sync::Arc;

/// External service boundary answering existence queries
///
/// Implementations report absence as [`LookupError::EntityNotFound`] and any
/// failure to complete the call as one of the transport variants.
#[async_trait]
pub trait Lookup: Send + Sync {
    /// Resolve a query to the referenced entity
    ///
    /// # Errors
    /// - `LookupError::EntityNotFound` if the entity does not exist
    /// - `LookupError::Transport`, `Timeout` or `Malformed` if the call could not complete
    async fn lookup(&self, query: &LookupQuery) -> Result<EntityRef, LookupError>;
}

#[async_trait]
impl<L: Lookup + ?Sized> Lookup for Arc<L> {
    async fn lookup(&self, query: &LookupQuery) -> Result<EntityRef, LookupError> {
        (**self).lookup(query).await
    }
}

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for lookup collaborators
    pub use crate::{
        EntityRef, FailureCategory, InMemoryCatalog, Lookup, LookupError, LookupKind,
        LookupQuery, LookupResult,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
