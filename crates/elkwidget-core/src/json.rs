use crate::defs::ElkDefs;
use crate::elk::ElkNode;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub(crate) fn from_value_ref<T: DeserializeOwned>(value: &Value) -> Result<T, serde_json::Error> {
    T::deserialize(value)
}

/// JSON-in, JSON-out variant of [`crate::transform`].
///
/// A `null` definitions table is treated as empty.
pub fn transform_json(graph: &Value, defs: &Value, id_prefix: &str) -> crate::Result<Value> {
    let graph: ElkNode = from_value_ref(graph)?;
    let defs: ElkDefs = if defs.is_null() {
        ElkDefs::default()
    } else {
        from_value_ref(defs)?
    };
    let scene = crate::transform(&graph, &defs, id_prefix)?;
    Ok(scene.to_value()?)
}
