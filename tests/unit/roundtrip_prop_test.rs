//! Property tests: well-behaved keys survive camel -> snake -> camel
//!
//! Keys are built from lower-case ASCII words joined by underscores. Keys
//! with digits, capital runs or stray underscores are excluded because the
//! two conventions do not invert each other on them.

use keycase::{camel, convert_to_camel_recursive, convert_to_snake_recursive, snake};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn snake_key() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,8}", 1..4).prop_map(|words| words.join("_"))
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z_ ]{0,12}".prop_map(Value::String),
    ]
}

fn arb_snake_json() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((snake_key(), inner), 0..6).prop_map(|entries| {
                Value::Object(entries.into_iter().collect::<Map<String, Value>>())
            }),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn key_round_trip(key in snake_key()) {
        prop_assert_eq!(snake(&camel(&key)), key);
    }

    #[test]
    fn value_round_trip(value in arb_snake_json()) {
        let back = convert_to_snake_recursive(convert_to_camel_recursive(value.clone()));
        prop_assert_eq!(back, value);
    }

    #[test]
    fn camel_output_has_no_convertible_underscores(value in arb_snake_json()) {
        fn check(value: &Value) -> bool {
            match value {
                Value::Object(entries) => entries
                    .iter()
                    .all(|(k, v)| camel(k) == *k && check(v)),
                Value::Array(items) => items.iter().all(check),
                _ => true,
            }
        }
        prop_assert!(check(&convert_to_camel_recursive(value)));
    }
}
