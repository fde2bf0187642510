// src/domain/audit/diff.rs
use serde_json::{Map, Value};

/// One changed field in a before/after pair.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub old_value: Value,
    pub new_value: Value,
}

/// Shallow, key-driven diff of two flat field maps.
///
/// Iterates the keys of `new_values`; a key is emitted when the serialized
/// forms of its old and new values differ. A key present only in
/// `old_values` is not reported. Nested structures are compared as whole
/// serialized values, never recursed into.
pub fn diff_changes(
    old_values: &Map<String, Value>,
    new_values: &Map<String, Value>,
) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    for (field, new_value) in new_values {
        let old_value = old_values.get(field).cloned().unwrap_or(Value::Null);
        if serialized(&old_value) != serialized(new_value) {
            changes.push(FieldChange {
                field: field.clone(),
                old_value,
                new_value: new_value.clone(),
            });
        }
    }

    changes
}

fn serialized(value: &Value) -> String {
    value.to_string()
}
