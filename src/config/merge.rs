//! Layered overlay of configuration values.
//!
//! Each layer (defaults, config file, environment) is a JSON object keyed by
//! the config key names. Higher layers override lower ones key by key, except
//! that "empty" values never override: null, the empty string, and zero are
//! all treated as "not specified".

use serde_json::{Map, Value};

/// Whether a value counts as "not specified" for overlay purposes.
pub fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Overlay `top` onto `base`, with `top` taking precedence where it is set.
///
/// - Objects are merged recursively
/// - Unset values in `top` (null, `""`, `0`) preserve `base`
/// - Anything else in `top` replaces `base` entirely
///
/// # Example
/// ```
/// use serde_json::json;
/// use duplicacy_util::config::overlay;
///
/// let base = json!({ "lockdirectory": "/home/a/.duplicacy-util", "logfilecount": 5 });
/// let file = json!({ "lockdirectory": "", "logfilecount": 3 });
/// let result = overlay(base, file);
/// assert_eq!(result, json!({ "lockdirectory": "/home/a/.duplicacy-util", "logfilecount": 3 }));
/// ```
pub fn overlay(base: Value, top: Value) -> Value {
    match (base, top) {
        (Value::Object(mut base_map), Value::Object(top_map)) => {
            for (key, top_value) in top_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => overlay(base_value, top_value),
                    None if is_unset(&top_value) => continue,
                    None => top_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (base, top) if is_unset(&top) => base,
        (_, top) => top,
    }
}

/// Overlay multiple layers in order, with later layers taking precedence.
pub fn overlay_all(layers: impl IntoIterator<Item = Value>) -> Value {
    layers
        .into_iter()
        .fold(Value::Object(Map::new()), overlay)
}

/// Lowercase the top-level keys of an object, so lookups are case-insensitive.
///
/// Non-object values are returned unchanged.
pub fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect(),
        ),
        other => other,
    }
}
