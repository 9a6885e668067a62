//! Pharma Diff
//!
//! Minimal update payloads computed against the snapshot an edit session
//! started from, so submitting an edit never resends fields the user did not
//! touch.
//!
//! # Example
//!
//! ```rust
//! use pharma_diff::{diff_against_baseline, EntitySnapshot};
//! use serde_json::json;
//!
//! let baseline = EntitySnapshot::from_value(json!({ "name": "A", "price": 10 })).unwrap();
//! let current = json!({ "name": "A", "price": 20 });
//!
//! let changes = diff_against_baseline(Some(&baseline), current.as_object().unwrap());
//! assert_eq!(changes.to_json(), json!({ "price": 20 }));
//! ```

#![warn(missing_docs)]

pub mod change_set;
pub mod diff;
pub mod equality;
pub mod error;
pub mod snapshot;

// Re-exports
pub use change_set::ChangeSet;
pub use diff::{diff_against_baseline, diff_entities};
pub use equality::values_equal;
pub use error::DiffError;
pub use snapshot::{to_record, EntitySnapshot, Record};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
