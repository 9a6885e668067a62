//! Field value comparison
//!
//! Nested objects and arrays compare by deep value, so an edit to a single
//! leaf of a sub-object (for example one bound of a product's storage
//! conditions) marks the whole field as changed. Numbers compare by numeric
//! value regardless of their integer or float representation.

use serde_json::{Number, Value};

/// Whether two field values are equal
#[must_use]
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

#[allow(clippy::float_cmp)]
fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primitives_compare_strictly() {
        assert!(values_equal(&json!("A"), &json!("A")));
        assert!(!values_equal(&json!("A"), &json!("a")));
        assert!(!values_equal(&json!(true), &json!(false)));
        assert!(!values_equal(&json!(0), &json!(false)));
        assert!(!values_equal(&json!(""), &json!(null)));
    }

    #[test]
    fn numbers_compare_by_value() {
        assert!(values_equal(&json!(10), &json!(10.0)));
        assert!(values_equal(&json!(u64::MAX), &json!(u64::MAX)));
        assert!(!values_equal(&json!(-1), &json!(u64::MAX)));
        assert!(!values_equal(&json!(10), &json!(10.5)));
    }

    #[test]
    fn nested_objects_compare_deeply() {
        let a = json!({ "min": 2, "max": 8, "tags": ["cold"] });
        let same = json!({ "max": 8.0, "min": 2, "tags": ["cold"] });
        let leaf_changed = json!({ "min": 2, "max": 6, "tags": ["cold"] });
        let key_added = json!({ "min": 2, "max": 8, "tags": ["cold"], "humid": false });

        assert!(values_equal(&a, &same));
        assert!(!values_equal(&a, &leaf_changed));
        assert!(!values_equal(&a, &key_added));
    }

    #[test]
    fn arrays_respect_order() {
        assert!(values_equal(&json!([1, 2]), &json!([1, 2])));
        assert!(!values_equal(&json!([1, 2]), &json!([2, 1])));
        assert!(!values_equal(&json!([1]), &json!([1, 1])));
    }
}
