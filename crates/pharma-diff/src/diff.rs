//! Partial-update diff
//!
//! A field of the live form enters the change set exactly when its value
//! differs from the baseline's. Fields the form does not present are never
//! included, so the diff cannot express deletions.

use crate::change_set::ChangeSet;
use crate::equality::values_equal;
use crate::error::DiffError;
use crate::snapshot::{to_record, EntitySnapshot, Record};
use serde::Serialize;
use tracing::debug;

/// Fields of `current` that differ from `baseline`
///
/// Without a baseline (creation) every field of `current` is returned.
#[must_use]
pub fn diff_against_baseline(baseline: Option<&EntitySnapshot>, current: &Record) -> ChangeSet {
    let Some(baseline) = baseline else {
        return ChangeSet::from_record(current.clone());
    };

    let changed: Record = current
        .iter()
        .filter(|(name, value)| {
            baseline
                .get(name)
                .map_or(true, |original| !values_equal(original, value))
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    debug!(
        presented = current.len(),
        changed = changed.len(),
        "computed partial update"
    );
    ChangeSet::from_record(changed)
}

/// Diff two serializable entities field by field
///
/// # Errors
/// Returns error if either entity fails to serialize to an object
pub fn diff_entities<T: Serialize>(baseline: Option<&T>, current: &T) -> Result<ChangeSet, DiffError> {
    let snapshot = baseline.map(EntitySnapshot::from_entity).transpose()?;
    let current = to_record(current)?;
    Ok(diff_against_baseline(snapshot.as_ref(), &current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(fields) => fields,
            _ => unreachable!(),
        }
    }

    fn snapshot(value: Value) -> EntitySnapshot {
        EntitySnapshot::from_value(value).unwrap()
    }

    #[test]
    fn no_baseline_returns_everything() {
        let current = record(json!({ "name": "X", "price": 10 }));

        let changes = diff_against_baseline(None, &current);

        assert_eq!(changes.to_json(), json!({ "name": "X", "price": 10 }));
    }

    #[test]
    fn unchanged_fields_are_omitted() {
        let baseline = snapshot(json!({ "name": "A", "price": 10 }));
        let current = record(json!({ "name": "A", "price": 20 }));

        let changes = diff_against_baseline(Some(&baseline), &current);

        assert_eq!(changes.to_json(), json!({ "price": 20 }));
    }

    #[test]
    fn falsy_changes_are_kept() {
        let baseline = snapshot(json!({ "active": true, "stock": 5, "notes": "x", "supplier": "S-1" }));
        let current = record(json!({ "active": false, "stock": 0, "notes": "", "supplier": null }));

        let changes = diff_against_baseline(Some(&baseline), &current);

        assert_eq!(
            changes.to_json(),
            json!({ "active": false, "stock": 0, "notes": "", "supplier": null })
        );
    }

    #[test]
    fn identical_state_yields_empty_set() {
        let baseline = snapshot(json!({ "name": "A", "price": 10, "storage": { "min": 2 } }));

        let changes = diff_against_baseline(Some(&baseline), baseline.fields());

        assert!(changes.is_empty());
    }

    #[test]
    fn fields_absent_from_form_are_ignored() {
        let baseline = snapshot(json!({ "name": "A", "price": 10 }));
        let current = record(json!({ "price": 10 }));

        let changes = diff_against_baseline(Some(&baseline), &current);

        assert!(changes.is_empty());
        assert!(!changes.contains("name"));
    }

    #[test]
    fn fields_new_to_baseline_are_included() {
        let baseline = snapshot(json!({ "name": "A" }));
        let current = record(json!({ "name": "A", "discount": null }));

        let changes = diff_against_baseline(Some(&baseline), &current);

        assert_eq!(changes.to_json(), json!({ "discount": null }));
    }

    #[test]
    fn nested_leaf_edit_includes_whole_sub_object() {
        let baseline = snapshot(json!({ "storage": { "min": 2, "max": 8 } }));
        let current = record(json!({ "storage": { "min": 2, "max": 6 } }));

        let changes = diff_against_baseline(Some(&baseline), &current);

        assert_eq!(changes.to_json(), json!({ "storage": { "min": 2, "max": 6 } }));
    }

    #[test]
    fn integer_and_float_of_same_value_are_unchanged() {
        let baseline = snapshot(json!({ "price": 10 }));
        let current = record(json!({ "price": 10.0 }));

        assert!(diff_against_baseline(Some(&baseline), &current).is_empty());
    }
}
