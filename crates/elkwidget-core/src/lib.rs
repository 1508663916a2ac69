#![forbid(unsafe_code)]

//! ELK graph model and scene-graph transformer (headless).
//!
//! Takes the JSON graph written by the ELK layout engine, with every position and route already
//! computed, and produces the flat scene graph an interactive diagram view renders:
//! - one `defs` block holding reusable assets, referenced by prefixed id
//! - nodes, ports, labels and edges with resolved geometry, classes and references
//! - junction markers synthesized from edge junction points

pub mod config;
pub mod defs;
pub mod elk;
pub mod error;
pub mod features;
pub mod geom;
pub mod ids;
mod json;
pub mod scene;
pub mod transform;

pub use config::{DEFAULT_ID_PREFIX, WidgetConfig};
pub use defs::{DefsIndex, ElkDef, ElkDefs};
pub use elk::{
    EdgeRouting, ElkEdge, ElkEdgeSection, ElkLabel, ElkNode, ElkPort, ElkProperties, ElkShape,
    ExtendedRoute, PrimitiveRoute,
};
pub use error::{Error, Result};
pub use features::{Feature, FeatureSet, FeatureTable};
pub use geom::{Dimension, Point};
pub use ids::IdNamespace;
pub use json::transform_json;
pub use scene::{
    ElementKind, SDef, SDefs, SEdge, SElement, SGraph, SJunction, SLabel, SNode, SPort, SceneIter,
};
pub use transform::{ElkGraphTransformer, transform};

#[cfg(test)]
mod tests;
