mod elk;

use crate::*;
use serde_json::Value;

pub(super) fn graph(value: Value) -> ElkNode {
    serde_json::from_value(value).unwrap()
}

pub(super) fn defs(value: Value) -> ElkDefs {
    serde_json::from_value(value).unwrap()
}
