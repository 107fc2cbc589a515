//! Unit tests for converting serde_json trees
//!
//! Tests cover:
//! - Key renaming at every depth
//! - Leaf and array pass-through
//! - Key collisions, where the renamed value wins
//! - The engine entry point on raw strings

use keycase::{
    convert_json_keys, convert_json_string, convert_keys_recursive, convert_to_camel_recursive,
    convert_to_snake_recursive, ConversionConfig, Convention,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[cfg(test)]
mod json_conversion_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_key_rename() {
        let out = convert_to_camel_recursive(json!({"hello_world": "x"}));
        assert_eq!(out, json!({"helloWorld": "x"}));
        assert!(out.get("hello_world").is_none());

        let out = convert_to_snake_recursive(json!({"helloWorld": "x"}));
        assert_eq!(out, json!({"hello_world": "x"}));
    }

    #[test]
    fn test_nested_conversion_depth() {
        let out = convert_to_camel_recursive(json!({"a": {"b_c": {"d_e": 1}}}));
        assert_eq!(out, json!({"a": {"bC": {"dE": 1}}}));
    }

    #[test]
    fn test_leaf_pass_through() {
        for leaf in [json!(null), json!(true), json!(42), json!(1.5), json!("some_string")] {
            assert_eq!(convert_to_camel_recursive(leaf.clone()), leaf);
            assert_eq!(convert_to_snake_recursive(leaf.clone()), leaf);
        }
        assert_eq!(convert_to_camel_recursive(json!({})), json!({}));
        assert_eq!(convert_to_camel_recursive(json!([])), json!([]));
    }

    #[test]
    fn test_array_shape_preserved() {
        assert_eq!(convert_to_camel_recursive(json!(["a", "b", "c"])), json!(["a", "b", "c"]));
    }

    #[test]
    fn test_realistic_api_payload() {
        let response = json!({
            "data": [{
                "id": "dev-1",
                "attributes": {
                    "device_name": "laptop",
                    "last_seen_at": "2023-01-01T00:00:00Z",
                    "verdict_status": {"trust_level": "vulnerable", "issue_ids": ["uefi/boot-order"]}
                }
            }],
            "meta": {"total_count": 1}
        });

        let camel = convert_to_camel_recursive(response.clone());
        assert_eq!(
            camel,
            json!({
                "data": [{
                    "id": "dev-1",
                    "attributes": {
                        "deviceName": "laptop",
                        "lastSeenAt": "2023-01-01T00:00:00Z",
                        "verdictStatus": {"trustLevel": "vulnerable", "issueIds": ["uefi/boot-order"]}
                    }
                }],
                "meta": {"totalCount": 1}
            })
        );

        // well-behaved keys survive the trip back
        assert_eq!(convert_to_snake_recursive(camel), response);
    }

    #[test]
    fn test_collision_renamed_after_unchanged() {
        let (out, stats) = convert_json_keys(
            json!({"helloWorld": "A", "hello_world": "B"}),
            &mut Convention::Camel,
        );
        assert_eq!(out, json!({"helloWorld": "B"}));
        assert_eq!(stats.key_collisions, 1);
    }

    #[test]
    fn test_collision_renamed_before_unchanged() {
        let (out, stats) = convert_json_keys(
            json!({"hello_world": "B", "helloWorld": "A"}),
            &mut Convention::Camel,
        );
        assert_eq!(out, json!({"helloWorld": "B"}));
        assert_eq!(stats.key_collisions, 1);
    }

    #[test]
    fn test_snake_collision_renamed_value_wins() {
        let out = convert_keys_recursive(json!({"aB": 1, "a_b": 2}), Convention::Snake);
        assert_eq!(out, json!({"a_b": 1}));
        let out = convert_keys_recursive(json!({"a_b": 2, "aB": 1}), Convention::Snake);
        assert_eq!(out, json!({"a_b": 1}));
    }

    #[test]
    fn test_collision_keeps_first_position() {
        let out = convert_to_camel_recursive(json!({"a_b": 1, "middle": 2, "aB": 3}));
        let keys: Vec<&String> = out.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["aB", "middle"]);
        assert_eq!(out["aB"], 1);
    }

    #[test]
    fn test_convert_json_string() {
        let config = ConversionConfig::snake();
        let result = convert_json_string(r#"{"userId": 1, "roles": [{"roleName": "admin"}]}"#, &config).unwrap();
        assert_eq!(result.content, r#"{"user_id":1,"roles":[{"role_name":"admin"}]}"#);
        assert_eq!(result.statistics.keys.keys_seen, 3);
        assert_eq!(result.statistics.keys.keys_renamed, 2);

        let parsed: Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(parsed, result.value);
    }
}
