use crate::features::Feature;
use crate::scene::ElementKind;
use serde_json::{Map, Value};

/// Prefix used for definition references when the host does not provide one.
pub const DEFAULT_ID_PREFIX: &str = "elk";

/// Widget configuration, stored as a JSON object and addressed with dotted paths.
///
/// Recognised keys:
/// - `idPrefix`: prefix for resolved definition ids
/// - `features.<kind>.<feature>`: `false` suppresses a feature for an element kind
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig(Value);

impl Default for WidgetConfig {
    fn default() -> Self {
        Self(serde_json::json!({
            "idPrefix": DEFAULT_ID_PREFIX,
            "features": {},
        }))
    }
}

impl WidgetConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Defaults with `overrides` merged on top.
    pub fn with_overrides(overrides: &Value) -> Self {
        let mut config = Self::default();
        config.deep_merge(overrides);
        config
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get(dotted_path)?.as_bool()
    }

    fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn id_prefix(&self) -> &str {
        self.get_str("idPrefix")
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or(DEFAULT_ID_PREFIX)
    }

    /// The configured value of `features.<kind>.<feature>`, if any.
    pub fn feature_override(&self, kind: ElementKind, feature: Feature) -> Option<bool> {
        self.get_bool(&format!("features.{kind}.{feature}"))
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        let mut cur = &mut self.0;
        for segment in dotted_path.split('.') {
            // Intermediate non-objects (including a non-object root) are replaced.
            if !cur.is_object() {
                *cur = Value::Object(Map::new());
            }
            let Value::Object(map) = cur else {
                return;
            };
            cur = map.entry(segment).or_insert(Value::Null);
        }
        *cur = value;
    }

    pub fn deep_merge(&mut self, other: &Value) {
        merge_into(&mut self.0, other);
    }
}

/// Objects merge key by key; anything else in `incoming` replaces the base value.
fn merge_into(base: &mut Value, incoming: &Value) {
    if let (Value::Object(base_map), Value::Object(in_map)) = (&mut *base, incoming) {
        for (key, in_value) in in_map {
            merge_into(base_map.entry(key.clone()).or_insert(Value::Null), in_value);
        }
        return;
    }
    *base = incoming.clone();
}
