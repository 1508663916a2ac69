//! Input model: the JSON graph produced by the ELK layout engine.
//!
//! Ids are optional at this level; a missing id is reported by the transformer together with the
//! element's namespace.

use crate::geom::{Dimension, Point};
use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The subset of ELK `properties` read by the transformer.
///
/// Layout options (`org.eclipse.elk.*`) and any other keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElkProperties {
    #[serde(default)]
    pub css_classes: Option<String>,
    #[serde(default, rename = "use")]
    pub use_ref: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl ElkProperties {
    /// Splits `cssClasses` into individual class names; absent or blank yields no classes.
    pub fn css_classes(&self) -> Vec<String> {
        let Some(raw) = self.css_classes.as_deref() else {
            return Vec::new();
        };
        raw.trim()
            .split(' ')
            .filter(|class| !class.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn use_ref(&self) -> Option<&str> {
        self.use_ref.as_deref()
    }

    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    pub fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }
}

/// Geometry shared by every shape-bearing element. Missing coordinates default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ElkShape {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl ElkShape {
    pub fn position(&self) -> Point {
        Point::new(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
    }

    pub fn size(&self) -> Dimension {
        Dimension::new(self.width.unwrap_or(0.0), self.height.unwrap_or(0.0))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ElkNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub shape: ElkShape,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: ElkProperties,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<ElkNode>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ports: Vec<ElkPort>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<ElkLabel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub edges: Vec<ElkEdge>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ElkPort {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub shape: ElkShape,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: ElkProperties,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<ElkLabel>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ElkLabel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(flatten)]
    pub shape: ElkShape,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: ElkProperties,
}

/// One routed piece of an extended edge.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElkEdgeSection {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub start_point: Option<Point>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bend_points: Vec<Point>,
    #[serde(default)]
    pub end_point: Option<Point>,
}

impl ElkEdgeSection {
    /// Start point, bend points, end point.
    pub fn routing_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.start_point
            .into_iter()
            .chain(self.bend_points.iter().copied())
            .chain(self.end_point)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimitiveRoute {
    pub source: String,
    pub target: String,
    pub source_point: Option<Point>,
    pub bend_points: Vec<Point>,
    pub target_point: Option<Point>,
}

impl PrimitiveRoute {
    pub fn routing_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.source_point
            .into_iter()
            .chain(self.bend_points.iter().copied())
            .chain(self.target_point)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtendedRoute {
    pub sources: Vec<String>,
    pub targets: Vec<String>,
    pub sections: Vec<ElkEdgeSection>,
}

/// The two ELK edge representations, plus edges that carry neither (yet).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EdgeRouting {
    Primitive(PrimitiveRoute),
    Extended(ExtendedRoute),
    #[default]
    Unrouted,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawElkEdge")]
pub struct ElkEdge {
    pub id: Option<String>,
    pub properties: ElkProperties,
    pub routing: EdgeRouting,
    pub junction_points: Vec<Point>,
    pub labels: Vec<ElkLabel>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawElkEdge {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    properties: ElkProperties,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    source_point: Option<Point>,
    #[serde(default, deserialize_with = "null_as_default")]
    bend_points: Vec<Point>,
    #[serde(default)]
    target_point: Option<Point>,
    #[serde(default)]
    sources: Option<Vec<String>>,
    #[serde(default)]
    targets: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    sections: Vec<ElkEdgeSection>,
    #[serde(default, deserialize_with = "null_as_default")]
    junction_points: Vec<Point>,
    #[serde(default, deserialize_with = "null_as_default")]
    labels: Vec<ElkLabel>,
}

impl From<RawElkEdge> for ElkEdge {
    fn from(raw: RawElkEdge) -> Self {
        // Field presence decides the variant; primitive fields win when both are present.
        let routing = match (raw.source, raw.target, raw.sources, raw.targets) {
            (Some(source), Some(target), _, _) => EdgeRouting::Primitive(PrimitiveRoute {
                source,
                target,
                source_point: raw.source_point,
                bend_points: raw.bend_points,
                target_point: raw.target_point,
            }),
            (_, _, Some(sources), Some(targets)) => EdgeRouting::Extended(ExtendedRoute {
                sources,
                targets,
                sections: raw.sections,
            }),
            _ => EdgeRouting::Unrouted,
        };

        Self {
            id: raw.id,
            properties: raw.properties,
            routing,
            junction_points: raw.junction_points,
            labels: raw.labels,
        }
    }
}
