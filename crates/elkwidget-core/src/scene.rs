//! Output model: the flat, render-ready scene graph consumed by the diagram view.

use crate::geom::{Dimension, Point};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Graph,
    Defs,
    Def,
    Node,
    Port,
    Edge,
    Label,
    Junction,
}

impl ElementKind {
    pub const ALL: [ElementKind; 8] = [
        ElementKind::Graph,
        ElementKind::Defs,
        ElementKind::Def,
        ElementKind::Node,
        ElementKind::Port,
        ElementKind::Edge,
        ElementKind::Label,
        ElementKind::Junction,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Graph => "graph",
            ElementKind::Defs => "defs",
            ElementKind::Def => "def",
            ElementKind::Node => "node",
            ElementKind::Port => "port",
            ElementKind::Edge => "edge",
            ElementKind::Label => "label",
            ElementKind::Junction => "junction",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(())
    }
}

/// Root of a transformed document. Serializes with `"type": "graph"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "graph", rename_all = "camelCase")]
pub struct SGraph {
    pub id: String,
    pub children: Vec<SElement>,
    pub css_classes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SElement {
    Defs(SDefs),
    Def(SDef),
    Node(SNode),
    Port(SPort),
    Edge(SEdge),
    Label(SLabel),
    Junction(SJunction),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SDefs {
    pub id: String,
    pub children: Vec<SElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SDef {
    pub id: String,
    pub children: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SNode {
    pub id: String,
    pub position: Point,
    pub size: Dimension,
    pub children: Vec<SElement>,
    pub css_classes: Vec<String>,
    #[serde(default, rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SPort {
    pub id: String,
    pub position: Point,
    pub size: Dimension,
    pub children: Vec<SElement>,
    pub css_classes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SLabel {
    pub id: String,
    pub text: String,
    pub position: Point,
    pub size: Dimension,
    pub css_classes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SEdge {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    pub routing_points: Vec<Point>,
    pub children: Vec<SElement>,
    pub css_classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// A routing crossing marker synthesized from an edge's junction points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SJunction {
    pub id: String,
    pub position: Point,
}

impl SElement {
    pub fn id(&self) -> &str {
        match self {
            SElement::Defs(e) => &e.id,
            SElement::Def(e) => &e.id,
            SElement::Node(e) => &e.id,
            SElement::Port(e) => &e.id,
            SElement::Edge(e) => &e.id,
            SElement::Label(e) => &e.id,
            SElement::Junction(e) => &e.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            SElement::Defs(_) => ElementKind::Defs,
            SElement::Def(_) => ElementKind::Def,
            SElement::Node(_) => ElementKind::Node,
            SElement::Port(_) => ElementKind::Port,
            SElement::Edge(_) => ElementKind::Edge,
            SElement::Label(_) => ElementKind::Label,
            SElement::Junction(_) => ElementKind::Junction,
        }
    }

    /// Typed scene children. Definition fragments are opaque and not included.
    pub fn children(&self) -> &[SElement] {
        match self {
            SElement::Defs(e) => &e.children,
            SElement::Node(e) => &e.children,
            SElement::Port(e) => &e.children,
            SElement::Edge(e) => &e.children,
            SElement::Def(_) | SElement::Label(_) | SElement::Junction(_) => &[],
        }
    }

    pub fn css_classes(&self) -> &[String] {
        match self {
            SElement::Node(e) => &e.css_classes,
            SElement::Port(e) => &e.css_classes,
            SElement::Edge(e) => &e.css_classes,
            SElement::Label(e) => &e.css_classes,
            SElement::Defs(_) | SElement::Def(_) | SElement::Junction(_) => &[],
        }
    }
}

impl SGraph {
    /// Depth-first, pre-order walk over every element below the root.
    pub fn iter(&self) -> SceneIter<'_> {
        SceneIter {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// First element of `kind` with the given id, in document order.
    ///
    /// Ids are only unique per namespace, so the kind is part of the lookup.
    pub fn find(&self, kind: ElementKind, id: &str) -> Option<&SElement> {
        self.iter().find(|e| e.kind() == kind && e.id() == id)
    }

    pub fn defs(&self) -> Option<&SDefs> {
        self.children.iter().find_map(|e| match e {
            SElement::Defs(defs) => Some(defs),
            _ => None,
        })
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

pub struct SceneIter<'a> {
    stack: Vec<&'a SElement>,
}

impl<'a> Iterator for SceneIter<'a> {
    type Item = &'a SElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children().iter().rev());
        Some(next)
    }
}
