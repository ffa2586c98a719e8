//! Key-aware JSON transforms applied on load and save.
//!
//! Transforms see every node together with the key it is stored under (array
//! indices as strings, `""` for the root). Returning `None` removes an object
//! member; inside arrays and at the root it becomes `null`.

use std::sync::Arc;

use serde_json::Map;
use serde_json::Value as JsonValue;

/// Transform called with `(key, value)` for each JSON node.
pub type JsonTransform = Arc<dyn Fn(&str, JsonValue) -> Option<JsonValue> + Send + Sync>;

/// Applies `reviver` bottom-up: children are transformed before their parent.
pub fn revive(value: JsonValue, reviver: &JsonTransform) -> JsonValue {
    revive_node("", value, reviver).unwrap_or(JsonValue::Null)
}

fn revive_node(key: &str, value: JsonValue, reviver: &JsonTransform) -> Option<JsonValue> {
    let value = match value {
        JsonValue::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (k, v) in map {
                if let Some(v) = revive_node(&k, v, reviver) {
                    out.insert(k, v);
                }
            }
            JsonValue::Object(out)
        }
        JsonValue::Array(items) => JsonValue::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| revive_node(&i.to_string(), v, reviver).unwrap_or(JsonValue::Null))
                .collect(),
        ),
        other => other,
    };
    reviver(key, value)
}

/// Applies `replacer` top-down: a parent is transformed before its children.
pub fn replace(value: JsonValue, replacer: &JsonTransform) -> JsonValue {
    replace_node("", value, replacer).unwrap_or(JsonValue::Null)
}

fn replace_node(key: &str, value: JsonValue, replacer: &JsonTransform) -> Option<JsonValue> {
    let value = replacer(key, value)?;
    Some(match value {
        JsonValue::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (k, v) in map {
                if let Some(v) = replace_node(&k, v, replacer) {
                    out.insert(k, v);
                }
            }
            JsonValue::Object(out)
        }
        JsonValue::Array(items) => JsonValue::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| replace_node(&i.to_string(), v, replacer).unwrap_or(JsonValue::Null))
                .collect(),
        ),
        other => other,
    })
}

/// Shallow merge: members of `persisted` override members of `initial`.
///
/// A persisted value that is not an object replaces `initial` entirely.
pub fn merge(initial: JsonValue, persisted: Option<JsonValue>) -> JsonValue {
    match (initial, persisted) {
        (JsonValue::Object(mut base), Some(JsonValue::Object(overrides))) => {
            base.extend(overrides);
            JsonValue::Object(base)
        }
        (_, Some(persisted)) => persisted,
        (initial, None) => initial,
    }
}
