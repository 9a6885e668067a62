//! Pharma Validation
//!
//! Asynchronous existence validation for form fields that reference other
//! entities, such as the salesperson and product of a sales goal.
//!
//! # Overview
//!
//! - **ExistenceValidator**: debounced, fail-closed existence check for one kind
//! - **FieldHandle**: per-field state that cancels superseded checks
//! - **FieldOutcome**: `null` or `{ "<reasonCode>": { "value": ... } }`
//!
//! # Example
//!
//! ```rust
//! use pharma_lookup::{InMemoryCatalog, LookupKind};
//! use pharma_validation::{ExistenceValidator, FieldOutcome, ValidatorConfig};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let catalog = InMemoryCatalog::new();
//! catalog.insert(LookupKind::Salesperson, "VE-01", serde_json::Value::Null);
//!
//! let validator = ExistenceValidator::salesperson_exists(Arc::new(catalog), ValidatorConfig::new());
//! let field = validator.attach();
//!
//! field.set_value("VE-0");
//! field.set_value("VE-01");
//! assert_eq!(field.settled().await, FieldOutcome::Valid);
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod field;
pub mod outcome;
pub mod validator;

// Re-exports
pub use config::ValidatorConfig;
pub use field::FieldHandle;
pub use outcome::{FieldOutcome, FieldState, ReasonCode};
pub use validator::{settle_input, ExistenceValidator};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for field validation
    pub use crate::{
        ExistenceValidator, FieldHandle, FieldOutcome, FieldState, ReasonCode, ValidatorConfig,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
