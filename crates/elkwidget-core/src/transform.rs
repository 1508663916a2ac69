//! ELK graph → scene graph transformation.
//!
//! The transform is all-or-nothing: the first missing or duplicate id aborts it and no partial
//! document is returned.

use crate::defs::{DefsIndex, ElkDefs};
use crate::elk::{EdgeRouting, ElkEdge, ElkLabel, ElkNode, ElkPort};
use crate::ids::{IdNamespace, IdRegistry};
use crate::scene::{SDef, SDefs, SEdge, SElement, SGraph, SJunction, SLabel, SNode, SPort};
use crate::Result;

/// Id used for the root when the input graph has none.
pub const ROOT_ID: &str = "root";
/// Id of the single `defs` container emitted as the root's first child.
pub const DEFS_ID: &str = "defs";

/// Converts ELK JSON graphs into scene graphs.
///
/// Holds no state between calls; all id bookkeeping lives in a per-call context, so one value
/// can be reused for any number of transforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElkGraphTransformer;

impl ElkGraphTransformer {
    pub fn new() -> Self {
        Self
    }

    pub fn transform(&self, graph: &ElkNode, defs: &ElkDefs, id_prefix: &str) -> Result<SGraph> {
        tracing::debug!(
            definitions = defs.len(),
            keys = ?defs.keys().collect::<Vec<_>>(),
            id_prefix,
            "transforming elk graph"
        );

        let index = DefsIndex::build(defs, id_prefix);
        let mut cx = TransformContext {
            defs: &index,
            ids: IdRegistry::default(),
        };

        let mut children = Vec::with_capacity(1 + graph.children.len() + graph.edges.len());
        children.push(SElement::Defs(transform_defs(defs)));
        for node in &graph.children {
            children.push(SElement::Node(cx.node(node)?));
        }
        for edge in &graph.edges {
            children.push(SElement::Edge(cx.edge(edge)?));
        }

        let id = graph
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(ROOT_ID)
            .to_string();

        Ok(SGraph {
            id,
            children,
            css_classes: graph.properties.css_classes(),
        })
    }
}

/// Transforms `graph` with a fresh [`ElkGraphTransformer`].
pub fn transform(graph: &ElkNode, defs: &ElkDefs, id_prefix: &str) -> Result<SGraph> {
    ElkGraphTransformer::new().transform(graph, defs, id_prefix)
}

fn transform_defs(defs: &ElkDefs) -> SDefs {
    let children = defs
        .iter()
        .map(|(key, def)| {
            tracing::debug!(key, fragments = def.children.len(), "transforming def");
            SElement::Def(SDef {
                id: key.to_string(),
                children: def.children.clone(),
            })
        })
        .collect();

    SDefs {
        id: DEFS_ID.to_string(),
        children,
    }
}

struct TransformContext<'a> {
    defs: &'a DefsIndex,
    ids: IdRegistry,
}

impl TransformContext<'_> {
    fn node(&mut self, node: &ElkNode) -> Result<SNode> {
        let id = self.ids.remember(IdNamespace::Node, node.id.as_deref())?;
        tracing::trace!(id, "node");

        let mut children = Vec::with_capacity(
            node.children.len() + node.ports.len() + node.labels.len() + node.edges.len(),
        );
        for child in &node.children {
            children.push(SElement::Node(self.node(child)?));
        }
        for port in &node.ports {
            children.push(SElement::Port(self.port(port)?));
        }
        for label in &node.labels {
            children.push(SElement::Label(self.label(label)?));
        }
        for edge in &node.edges {
            children.push(SElement::Edge(self.edge(edge)?));
        }

        Ok(SNode {
            id: id.to_string(),
            position: node.shape.position(),
            size: node.shape.size(),
            children,
            css_classes: node.properties.css_classes(),
            use_ref: self.defs.resolve(node.properties.use_ref()),
        })
    }

    fn port(&mut self, port: &ElkPort) -> Result<SPort> {
        let id = self.ids.remember(IdNamespace::Port, port.id.as_deref())?;
        tracing::trace!(id, "port");

        let children = self.labels(&port.labels)?;
        Ok(SPort {
            id: id.to_string(),
            position: port.shape.position(),
            size: port.shape.size(),
            children,
            css_classes: port.properties.css_classes(),
        })
    }

    fn label(&mut self, label: &ElkLabel) -> Result<SLabel> {
        let id = self.ids.remember(IdNamespace::Label, label.id.as_deref())?;
        tracing::trace!(id, "label");

        Ok(SLabel {
            id: id.to_string(),
            text: label.text.clone().unwrap_or_default(),
            position: label.shape.position(),
            size: label.shape.size(),
            css_classes: label.properties.css_classes(),
        })
    }

    fn labels(&mut self, labels: &[ElkLabel]) -> Result<Vec<SElement>> {
        labels
            .iter()
            .map(|label| self.label(label).map(SElement::Label))
            .collect()
    }

    fn edge(&mut self, edge: &ElkEdge) -> Result<SEdge> {
        let id = self.ids.remember(IdNamespace::Edge, edge.id.as_deref())?;
        tracing::trace!(id, "edge");

        let mut source_id = String::new();
        let mut target_id = String::new();
        let mut routing_points = Vec::new();
        match &edge.routing {
            EdgeRouting::Primitive(route) => {
                source_id.clone_from(&route.source);
                target_id.clone_from(&route.target);
                routing_points.extend(route.routing_points());
            }
            EdgeRouting::Extended(route) => {
                // Hyperedges collapse to their first endpoints.
                if let Some(source) = route.sources.first() {
                    source_id.clone_from(source);
                }
                if let Some(target) = route.targets.first() {
                    target_id.clone_from(target);
                }
                for section in &route.sections {
                    self.ids
                        .remember(IdNamespace::Section, section.id.as_deref())?;
                    routing_points.extend(section.routing_points());
                }
            }
            EdgeRouting::Unrouted => {}
        }

        let mut children = Vec::with_capacity(edge.junction_points.len() + edge.labels.len());
        children.extend(
            edge.junction_points
                .iter()
                .enumerate()
                .map(|(i, point)| {
                    SElement::Junction(SJunction {
                        id: format!("{id}_j{i}"),
                        position: *point,
                    })
                }),
        );
        children.extend(self.labels(&edge.labels)?);

        Ok(SEdge {
            id: id.to_string(),
            source_id,
            target_id,
            routing_points,
            children,
            css_classes: edge.properties.css_classes(),
            start: self.defs.resolve(edge.properties.start()),
            end: self.defs.resolve(edge.properties.end()),
        })
    }
}
