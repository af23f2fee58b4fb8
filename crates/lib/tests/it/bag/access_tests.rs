//! Read-side tests: get, get_or, has, lookup/contains, get_as_values and wrapping.

use parambag::{Bag, Handle, Value, path};

use crate::helpers::*;

// ===== BASIC READS =====

#[test]
fn test_get_returns_terminal_values() {
    let config = setup_config();

    assert_eq!(config.get("app.name").unwrap(), "demo");
    assert_eq!(config.get("app.debug").unwrap(), false);
    assert_eq!(config.get("database.port").unwrap(), 5432);
    assert_eq!(
        config.get("database.replicas").unwrap(),
        Value::from(vec!["r1", "r2"])
    );
}

#[test]
fn test_get_missing_returns_null() {
    let config = setup_config();

    assert_eq!(config.get("nope").unwrap(), Value::Null);
    assert_eq!(config.get("app.nope.deeper").unwrap(), Value::Null);
    // Descending through a leaf is a miss, not an error
    assert_eq!(config.get("app.name.first").unwrap(), Value::Null);
}

#[test]
fn test_get_or_falls_back_on_any_missing_segment() {
    let config = setup_config();

    assert_eq!(config.get_or("missing.path", "fallback").unwrap(), "fallback");
    assert_eq!(config.get_or("app.missing", 7).unwrap(), 7);
    assert_eq!(config.get_or("app.name.missing", true).unwrap(), true);
    // Present values win over the default
    assert_eq!(config.get_or("app.name", "fallback").unwrap(), "demo");
}

#[test]
fn test_get_or_wraps_mapping_defaults() {
    let config = setup_config();
    let default = bag_from(r#"{"level": "info"}"#);

    let value = config.get_or("logging", default.handle()).unwrap();
    let logging = expect_map(value);
    assert_eq!(logging.get("level").unwrap(), "info");
    assert!(logging.shares_storage(&default));
}

#[test]
fn test_get_descends_into_lists_by_index() {
    let bag = bag_from(r#"{"servers": [{"host": "a"}, {"host": "b"}]}"#);

    assert_eq!(bag.get("servers.0.host").unwrap(), "a");
    assert_eq!(bag.get("servers.1.host").unwrap(), "b");
    assert_eq!(bag.get("servers.2.host").unwrap(), Value::Null);
    assert_eq!(bag.get("servers.x").unwrap(), Value::Null);
}

#[test]
fn test_get_as_converts_values() {
    let config = setup_config();

    assert_eq!(config.get_as::<i64>("database.port").unwrap(), Some(5432));
    assert_eq!(
        config.get_as::<String>("app.name").unwrap(),
        Some("demo".to_string())
    );
    assert_eq!(config.get_as::<bool>("missing").unwrap(), None);

    let err = config.get_as::<i64>("app.name").unwrap_err();
    assert!(err.is_type_error());
}

// ===== WRAPPING =====

#[test]
fn test_nested_mappings_are_wrapped() {
    let config = setup_config();

    let app = expect_map(config.get("app").unwrap());
    assert_eq!(app.get("name").unwrap(), "demo");
    assert_eq!(app.len(), 2);
}

#[test]
fn test_wrapper_writes_reach_the_original() {
    let bag = bag_from(r#"{"a": {"b": 1}}"#);

    let wrapper = expect_map(bag.get("a").unwrap());
    wrapper.set("b", 2).unwrap();

    assert_eq!(bag.get("a.b").unwrap(), 2);
}

#[test]
fn test_each_read_is_a_new_handle_on_the_same_mapping() {
    let bag = bag_from(r#"{"a": {"b": 1}}"#);

    let first = expect_map(bag.get("a").unwrap());
    let second = expect_map(bag.get("a").unwrap());
    assert!(first.shares_storage(&second));

    first.set("c", 3).unwrap();
    assert_eq!(second.get("c").unwrap(), 3);
}

#[test]
fn test_wrapper_outlives_the_original_handle() {
    let bag = bag_from(r#"{"a": {"b": 1}}"#);
    let wrapper = expect_map(bag.get("a").unwrap());
    drop(bag);

    wrapper.set("b", 5).unwrap();
    assert_eq!(wrapper.get("b").unwrap(), 5);
}

#[test]
fn test_empty_path_reads_the_root() {
    let config = setup_config();

    let root = expect_map(config.get(path!()).unwrap());
    assert!(root.shares_storage(&config));
    assert!(config.has(Vec::<&str>::new()).unwrap());
    assert!(config.contains(path!()).unwrap());
}

// ===== GET AS VALUES =====

#[test]
fn test_get_as_values_returns_shared_bag() {
    let config = setup_config();

    let database = config.get_as_values("database").unwrap();
    database.set("port", 6543).unwrap();
    assert_eq!(config.get("database.port").unwrap(), 6543);
}

#[test]
fn test_get_as_values_missing_path_returns_empty_bag() {
    let config = setup_config();

    let missing = config.get_as_values("cache.redis").unwrap();
    assert!(missing.is_empty());
    assert_eq!(missing.get_or("url", "none").unwrap(), "none");

    // The empty bag is detached from the config
    missing.set("url", "redis://").unwrap();
    assert!(!config.has("cache").unwrap());
}

#[test]
fn test_get_as_values_on_leaf_returns_empty_bag() {
    let config = setup_config();

    let leaf = config.get_as_values("app.name").unwrap();
    assert!(leaf.is_empty());
}

// ===== HAS / CONTAINS =====

#[test]
fn test_has_reports_non_null_values() {
    let config = setup_config();

    assert!(config.has("app").unwrap());
    assert!(config.has("app.debug").unwrap()); // false is still a value
    assert!(config.has("database.replicas").unwrap());
    assert!(!config.has("missing").unwrap());
    assert!(!config.has("app.missing").unwrap());
}

#[test]
fn test_has_treats_stored_null_as_missing() {
    let bag = Bag::new();
    bag.set("a", Value::Null).unwrap();

    // Same answer as for a key that was never set
    assert!(!bag.has("a").unwrap());
    assert!(!bag.has("never").unwrap());

    // get with a default also looks straight through the null
    assert_eq!(bag.get_or("a", "default").unwrap(), "default");
}

#[test]
fn test_contains_distinguishes_stored_null() {
    let bag = Bag::new();
    bag.set("a", Value::Null).unwrap();

    assert!(bag.contains("a").unwrap());
    assert!(!bag.contains("never").unwrap());
    assert_eq!(bag.lookup("a").unwrap(), Some(Value::Null));
    assert_eq!(bag.lookup("never").unwrap(), None);
}

#[test]
fn test_contains_on_fixture_null() {
    let config = setup_config();

    assert!(config.contains("features").unwrap());
    assert!(!config.has("features").unwrap());
    assert!(!config.contains("features.flag").unwrap());
}
