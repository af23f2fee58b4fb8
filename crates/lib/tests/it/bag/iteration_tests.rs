//! Top-level iteration tests.

use parambag::{Bag, Value};

use crate::helpers::*;

#[test]
fn test_iteration_follows_construction_order() {
    let bag = bag_from(r#"{"z": 1, "a": 2, "m": 3}"#);

    let keys: Vec<String> = bag.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_iteration_follows_insertion_order() {
    let bag = Bag::new();
    bag.set("z", 1).unwrap().set("a", 2).unwrap().set("m", 3).unwrap();

    let pairs: Vec<(String, Value)> = bag.iter().collect();
    assert_eq!(
        pairs,
        vec![
            ("z".to_string(), Value::Int(1)),
            ("a".to_string(), Value::Int(2)),
            ("m".to_string(), Value::Int(3)),
        ]
    );
}

#[test]
fn test_iteration_is_stable_across_passes() {
    let bag = setup_config();

    let first: Vec<String> = bag.iter().map(|(key, _)| key).collect();
    let second: Vec<String> = (&bag).into_iter().map(|(key, _)| key).collect();
    assert_eq!(first, second);
    assert_eq!(first, vec!["app", "database", "features"]);
}

#[test]
fn test_iteration_is_top_level_only() {
    let bag = setup_config();
    assert_eq!(bag.iter().count(), 3);
    assert_eq!(bag.count(), 3);
}

#[test]
fn test_iteration_wraps_nested_mappings() {
    let bag = setup_config();

    for (key, value) in &bag {
        match key.as_str() {
            "app" | "database" => {
                let nested = expect_map(value);
                nested.set("visited", true).unwrap();
            }
            "features" => assert_eq!(value, Value::Null),
            other => panic!("Unexpected key {other}"),
        }
    }

    assert_eq!(bag.get("app.visited").unwrap(), true);
    assert_eq!(bag.get("database.visited").unwrap(), true);
}

#[test]
fn test_rewind_restarts_iteration() {
    let bag = bag_from(r#"{"a": 1, "b": 2}"#);
    let mut iter = bag.iter();

    assert_eq!(iter.next().map(|(key, _)| key), Some("a".to_string()));
    assert_eq!(iter.next().map(|(key, _)| key), Some("b".to_string()));
    assert!(iter.next().is_none());

    iter.rewind();
    assert_eq!(iter.key(), Some("a".to_string()));
    assert_eq!(iter.count(), 2);
}

#[test]
fn test_count_and_is_empty() {
    let bag = Bag::new();
    assert!(bag.is_empty());
    assert_eq!(bag.count(), 0);

    bag.set("a.b.c", 1).unwrap();
    assert!(!bag.is_empty());
    assert_eq!(bag.count(), 1);
    assert_eq!(bag.len(), 1);
}

#[test]
fn test_keys_in_order() {
    let bag = bag_from(r#"{"z": 1, "a": 2, "m": 3}"#);
    assert_keys(&bag, &["z", "a", "m"]);
}

#[test]
fn test_writes_during_iteration_do_not_panic() {
    let bag = bag_from(r#"{"a": 1, "b": 2}"#);

    let mut seen = Vec::new();
    for (key, _) in bag.iter() {
        bag.set(format!("{key}_copy").as_str(), 0).unwrap();
        seen.push(key);
        if seen.len() > 10 {
            break;
        }
    }

    assert!(seen.len() >= 2);
    assert!(bag.has("a_copy").unwrap());
}
