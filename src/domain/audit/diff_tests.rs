// src/domain/audit/diff_tests.rs
#[cfg(test)]
mod tests {
    use crate::domain::audit::diff::diff_changes;
    use serde_json::{json, Map, Value};

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().expect("expected a JSON object").clone()
    }

    #[test]
    fn identical_maps_produce_no_changes() {
        let old = map(json!({"name": "Ada", "age": 36}));
        let new = old.clone();
        assert!(diff_changes(&old, &new).is_empty());
    }

    #[test]
    fn changed_and_added_keys_appear_exactly_once() {
        let old = map(json!({"name": "Ada", "city": "London"}));
        let new = map(json!({"name": "Grace", "city": "London", "rank": "admiral"}));

        let changes = diff_changes(&old, &new);
        assert_eq!(changes.len(), 2);

        let name = changes.iter().find(|c| c.field == "name").unwrap();
        assert_eq!(name.old_value, json!("Ada"));
        assert_eq!(name.new_value, json!("Grace"));

        let rank = changes.iter().find(|c| c.field == "rank").unwrap();
        assert_eq!(rank.old_value, Value::Null);
        assert_eq!(rank.new_value, json!("admiral"));
    }

    #[test]
    fn keys_removed_from_new_map_are_not_reported() {
        let old = map(json!({"name": "Ada", "legacy_field": true}));
        let new = map(json!({"name": "Ada"}));
        assert!(diff_changes(&old, &new).is_empty());
    }

    #[test]
    fn nested_values_are_compared_as_whole_serialized_forms() {
        let old = map(json!({"tags": ["a", "b"]}));
        let same = map(json!({"tags": ["a", "b"]}));
        let reordered = map(json!({"tags": ["b", "a"]}));

        assert!(diff_changes(&old, &same).is_empty());

        let changes = diff_changes(&old, &reordered);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, "tags");
    }

    #[test]
    fn type_changes_are_reported() {
        let old = map(json!({"count": 1}));
        let new = map(json!({"count": "1"}));

        let changes = diff_changes(&old, &new);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].old_value, json!(1));
        assert_eq!(changes[0].new_value, json!("1"));
    }
}
