//! Deep merge tests.

use parambag::{Bag, Handle};

use crate::helpers::*;

#[test]
fn test_merge_recursive_union_incoming_wins() {
    let bag = bag_from(r#"{"a": {"x": 1, "y": 2}}"#);
    bag.merge(&bag_from(r#"{"a": {"y": 3, "z": 4}}"#));

    assert_json_eq(&bag, r#"{"a": {"x": 1, "y": 3, "z": 4}}"#);
}

#[test]
fn test_merge_mapping_replaces_leaf() {
    let bag = bag_from(r#"{"a": 1}"#);
    bag.merge(&bag_from(r#"{"a": {"b": 2}}"#));

    assert_json_eq(&bag, r#"{"a": {"b": 2}}"#);
}

#[test]
fn test_merge_leaf_replaces_mapping() {
    let bag = bag_from(r#"{"a": {"b": 2}}"#);
    bag.merge(&bag_from(r#"{"a": 1}"#));

    assert_json_eq(&bag, r#"{"a": 1}"#);
}

#[test]
fn test_merge_replaces_lists_whole() {
    let bag = bag_from(r#"{"tags": ["a", "b", "c"]}"#);
    bag.merge(&bag_from(r#"{"tags": ["z"]}"#));

    assert_json_eq(&bag, r#"{"tags": ["z"]}"#);
}

#[test]
fn test_merge_null_replaces_value() {
    let bag = bag_from(r#"{"a": {"b": 1}}"#);
    bag.merge(&bag_from(r#"{"a": null}"#));

    assert!(bag.contains("a").unwrap());
    assert!(!bag.has("a").unwrap());
}

#[test]
fn test_merge_into_empty_and_from_empty() {
    let bag = Bag::new();
    bag.merge(&setup_config());
    assert_eq!(bag, setup_config());

    let config = setup_config();
    config.merge(&Bag::new());
    assert_eq!(config, setup_config());
}

#[test]
fn test_merge_is_chainable() {
    let bag = bag_from(r#"{"a": 1}"#);
    bag.merge(&bag_from(r#"{"b": 2}"#))
        .merge(&bag_from(r#"{"c": 3}"#))
        .set("d", 4)
        .unwrap();

    assert_keys(&bag, &["a", "b", "c", "d"]);
}

#[test]
fn test_merge_keeps_positions_and_appends_new_keys() {
    let bag = bag_from(r#"{"z": 1, "a": 2, "m": 3}"#);
    bag.merge(&bag_from(r#"{"new": 0, "a": 20}"#));

    assert_keys(&bag, &["z", "a", "m", "new"]);
    assert_eq!(bag.get("a").unwrap(), 20);
}

#[test]
fn test_merge_mutates_existing_nested_handles() {
    let bag = bag_from(r#"{"db": {"host": "localhost"}}"#);
    let db = bag.get_as_values("db").unwrap();

    bag.merge(&bag_from(r#"{"db": {"port": 5432}}"#));

    // Nested mappings are merged in place, so earlier handles see the result
    assert_eq!(db.get("port").unwrap(), 5432);
    assert_eq!(db.get("host").unwrap(), "localhost");
}

#[test]
fn test_merge_does_not_alias_incoming() {
    let bag = Bag::new();
    let incoming = bag_from(r#"{"db": {"host": "a"}}"#);
    bag.merge(&incoming);

    incoming.set("db.host", "b").unwrap();
    assert_eq!(bag.get("db.host").unwrap(), "a");
}

#[test]
fn test_merge_with_itself() {
    let bag = setup_config();
    let expected = setup_config();

    bag.merge(&bag.handle());
    assert_eq!(bag, expected);

    let database = bag.get_as_values("database").unwrap();
    database.merge(&bag);
    assert_eq!(bag.get("database.app.name").unwrap(), "demo");
}

#[test]
fn test_merge_deep_nesting() {
    let bag = bag_from(r#"{"a": {"b": {"c": {"d": 1, "e": 2}}}}"#);
    bag.merge(&bag_from(r#"{"a": {"b": {"c": {"e": 3}, "f": 4}}}"#));

    assert_json_eq(&bag, r#"{"a": {"b": {"c": {"d": 1, "e": 3}, "f": 4}}}"#);
}
