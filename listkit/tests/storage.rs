//! Tests for persisted values.

use std::sync::Arc;

use listkit::error::StorageError;
use listkit::sorting::{Direction, SortEntry};
use listkit::storage::{
    DEFAULT_STORAGE_KEY, MemoryStorage, SqliteStorage, StorageBackend, StorageConfig, Stored,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Pair {
    a: i64,
    b: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct ViewPrefs {
    page_size: usize,
    sort: Vec<SortEntry>,
}

fn stored_json(backend: &impl StorageBackend, key: &str) -> serde_json::Value {
    let raw = backend.get_item(key).unwrap().expect("value should be persisted");
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_persisted_fields_override_initial() {
    let backend = Arc::new(MemoryStorage::new());
    backend.set_item("pair", r#"{"b":3}"#).unwrap();

    let pair = Stored::open(
        backend.clone(),
        StorageConfig::new().with_key("pair").with_initial(Pair { a: 1, b: 2 }),
    )
    .unwrap();
    assert_eq!(pair.get(), Pair { a: 1, b: 3 });
}

#[test]
fn test_mutation_writes_full_value() {
    let backend = Arc::new(MemoryStorage::new());
    backend.set_item("pair", r#"{"b":3}"#).unwrap();
    let pair = Stored::open(
        backend.clone(),
        StorageConfig::new().with_key("pair").with_initial(Pair { a: 1, b: 2 }),
    )
    .unwrap();

    pair.update(|p| p.a = 10).unwrap();
    assert_eq!(stored_json(&*backend, "pair"), json!({ "a": 10, "b": 3 }));

    pair.set(Pair { a: 0, b: 0 }).unwrap();
    assert_eq!(stored_json(&*backend, "pair"), json!({ "a": 0, "b": 0 }));
    assert_eq!(pair.version(), 2);
}

#[test]
fn test_open_does_not_write() {
    let backend = Arc::new(MemoryStorage::new());
    let _pair = Stored::open(
        backend.clone(),
        StorageConfig::new().with_initial(Pair { a: 1, b: 2 }),
    )
    .unwrap();
    assert!(backend.is_empty());
}

#[test]
fn test_default_key() {
    let backend = Arc::new(MemoryStorage::new());
    let pair = Stored::open(
        backend.clone(),
        StorageConfig::new().with_key("").with_initial(Pair { a: 1, b: 2 }),
    )
    .unwrap();
    assert_eq!(pair.key(), DEFAULT_STORAGE_KEY);

    pair.persist().unwrap();
    assert_eq!(stored_json(&*backend, DEFAULT_STORAGE_KEY), json!({ "a": 1, "b": 2 }));
}

#[test]
fn test_empty_string_counts_as_missing() {
    let backend = Arc::new(MemoryStorage::new());
    backend.set_item("pair", "").unwrap();
    let pair = Stored::open(
        backend,
        StorageConfig::new().with_key("pair").with_initial(Pair { a: 1, b: 2 }),
    )
    .unwrap();
    assert_eq!(pair.get(), Pair { a: 1, b: 2 });
}

#[test]
fn test_malformed_value_surfaces_parse_error() {
    let backend = Arc::new(MemoryStorage::new());
    backend.set_item("pair", "{not json").unwrap();
    let result = Stored::open(
        backend,
        StorageConfig::new().with_key("pair").with_initial(Pair { a: 1, b: 2 }),
    );
    assert!(matches!(result, Err(StorageError::Parse { key, .. }) if key == "pair"));
}

#[test]
fn test_wrong_shape_surfaces_deserialize_error() {
    let backend = Arc::new(MemoryStorage::new());
    backend.set_item("pair", r#"{"a":"one"}"#).unwrap();
    let result = Stored::open(
        backend,
        StorageConfig::new().with_key("pair").with_initial(Pair { a: 1, b: 2 }),
    );
    assert!(matches!(result, Err(StorageError::Deserialize { .. })));
}

#[test]
fn test_without_initial_uses_persisted_object() {
    let backend = Arc::new(MemoryStorage::new());
    let prefs: Stored<ViewPrefs> = Stored::open(backend.clone(), StorageConfig::new()).unwrap();
    assert_eq!(prefs.get(), ViewPrefs::default());

    prefs
        .update(|p| {
            p.page_size = 25;
            p.sort.push(SortEntry::new("name", Direction::Desc));
        })
        .unwrap();

    let reopened: Stored<ViewPrefs> = Stored::open(backend, StorageConfig::new()).unwrap();
    assert_eq!(reopened.get().page_size, 25);
    assert_eq!(reopened.get().sort, vec![SortEntry::new("name", Direction::Desc)]);
}

#[test]
fn test_reviver_and_replacer() {
    let backend = Arc::new(MemoryStorage::new());
    backend.set_item("pair", r#"{"a":"7","b":1}"#).unwrap();

    // Stored as strings, used as numbers.
    let config = StorageConfig::new()
        .with_key("pair")
        .with_initial(Pair { a: 0, b: 0 })
        .with_reviver(|_, value| match value {
            serde_json::Value::String(s) => s.parse::<i64>().ok().map(serde_json::Value::from),
            other => Some(other),
        })
        .with_replacer(|key, value| match (key, value) {
            ("a", serde_json::Value::Number(n)) => Some(serde_json::Value::String(n.to_string())),
            (_, other) => Some(other),
        });

    let pair = Stored::open(backend.clone(), config).unwrap();
    assert_eq!(pair.get(), Pair { a: 7, b: 1 });

    pair.update(|p| p.a = 8).unwrap();
    assert_eq!(stored_json(&*backend, "pair"), json!({ "a": "8", "b": 1 }));
}

#[test]
fn test_two_values_share_a_backend() {
    let backend = Arc::new(MemoryStorage::new());
    let first = Stored::open(
        backend.clone(),
        StorageConfig::new().with_key("first").with_initial(Pair { a: 1, b: 1 }),
    )
    .unwrap();
    let second = Stored::open(
        backend.clone(),
        StorageConfig::new().with_key("second").with_initial(Pair { a: 2, b: 2 }),
    )
    .unwrap();

    first.persist().unwrap();
    second.persist().unwrap();
    assert_eq!(backend.len(), 2);

    backend.remove_item("first").unwrap();
    assert!(backend.get_item("first").unwrap().is_none());
}

#[test]
fn test_sqlite_backend_round_trip() {
    let backend = Arc::new(SqliteStorage::open_in_memory().unwrap());
    assert!(backend.is_empty().unwrap());

    let pair = Stored::open(
        backend.clone(),
        StorageConfig::new().with_key("pair").with_initial(Pair { a: 1, b: 2 }),
    )
    .unwrap();
    pair.update(|p| p.b = 5).unwrap();
    assert_eq!(stored_json(&*backend, "pair"), json!({ "a": 1, "b": 5 }));

    let reopened = Stored::open(
        backend.clone(),
        StorageConfig::new().with_key("pair").with_initial(Pair { a: 0, b: 0 }),
    )
    .unwrap();
    assert_eq!(reopened.get(), Pair { a: 1, b: 5 });

    backend.remove_item("pair").unwrap();
    assert_eq!(backend.len().unwrap(), 0);
}

#[test]
fn test_sqlite_file_persists_across_connections() {
    let path = std::env::temp_dir().join(format!("listkit-test-{}.db", uuid::Uuid::new_v4()));
    {
        let backend = SqliteStorage::open(&path).unwrap();
        backend.set_item("k", r#"{"a":1}"#).unwrap();
    }
    {
        let backend = SqliteStorage::open(&path).unwrap();
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some(r#"{"a":1}"#));
    }
    let _ = std::fs::remove_file(&path);
}
