use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A reusable visual asset (arrowhead, pattern, ...). The fragments are already in scene-graph
/// shape and are emitted untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElkDef {
    #[serde(default)]
    pub children: Vec<Value>,
}

impl ElkDef {
    pub fn new(children: Vec<Value>) -> Self {
        Self { children }
    }
}

/// Definitions table keyed by definition name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElkDefs(IndexMap<String, ElkDef>);

impl ElkDefs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, def: ElkDef) -> Option<ElkDef> {
        self.0.insert(key.into(), def)
    }

    pub fn get(&self, key: &str) -> Option<&ElkDef> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ElkDef)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ElkDef)> for ElkDefs {
    fn from_iter<I: IntoIterator<Item = (K, ElkDef)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Maps definition keys to the prefixed ids that `use`/`start`/`end` references resolve to.
///
/// Built once per transform from the whole table; there is no way to mutate it afterwards.
#[derive(Debug, Clone, Default)]
pub struct DefsIndex {
    ids: FxHashMap<String, String>,
}

impl DefsIndex {
    pub fn build(defs: &ElkDefs, id_prefix: &str) -> Self {
        let ids = defs
            .keys()
            .map(|key| (key.to_string(), format!("{id_prefix}_{key}")))
            .collect();
        Self { ids }
    }

    /// Resolves a reference key. Absent, empty or unknown keys resolve to `None`.
    pub fn resolve(&self, key: Option<&str>) -> Option<String> {
        let key = key.filter(|k| !k.is_empty())?;
        self.ids.get(key).cloned()
    }
}
