//! Pharma console operator commands
//!
//! - `check`: confirm a salesperson or product reference exists
//! - `diff`: compute the update payload for an edited entity

#![warn(missing_docs)]

pub mod config;

pub use config::{ConsoleConfig, ConsoleError};

use pharma_diff::{diff_against_baseline, ChangeSet, EntitySnapshot, Record};
use pharma_lookup::{HttpLookup, LookupKind};
use pharma_validation::{ExistenceValidator, FieldOutcome};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber; `RUST_LOG` overrides the default level
pub fn init_tracing(default_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Check that `id` refers to an existing entity of `kind`
///
/// # Errors
/// Returns `ConsoleError::Lookup` if the HTTP collaborator cannot be built
pub async fn run_check(
    config: &ConsoleConfig,
    kind: LookupKind,
    id: &str,
) -> Result<FieldOutcome, ConsoleError> {
    let lookup = HttpLookup::new(config.lookup.clone())?;
    let validator = ExistenceValidator::new(kind, Arc::new(lookup), config.validation);

    let outcome = validator.check_now(id).await;
    info!(%kind, id = id.trim(), valid = outcome.is_valid(), "existence check finished");
    Ok(outcome)
}

/// Diff `current` against an optional `baseline`, both JSON object files
///
/// # Errors
/// Returns error if a file cannot be read or does not hold a JSON object
pub fn run_diff(baseline: Option<&Path>, current: &Path) -> Result<ChangeSet, ConsoleError> {
    let snapshot = baseline
        .map(|path| read_record(path).map(EntitySnapshot::from_record))
        .transpose()?;
    let current = read_record(current)?;

    let changes = diff_against_baseline(snapshot.as_ref(), &current);
    info!(changed = changes.len(), create = snapshot.is_none(), "diff computed");
    Ok(changes)
}

fn read_record(path: &Path) -> Result<Record, ConsoleError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConsoleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| ConsoleError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    EntitySnapshot::from_value(value)
        .map(|snapshot| snapshot.fields().clone())
        .map_err(|source| ConsoleError::Entity {
            path: path.to_path_buf(),
            source,
        })
}
