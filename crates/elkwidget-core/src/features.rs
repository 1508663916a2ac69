//! Per-element-kind interaction capabilities.
//!
//! The diagram view asks this table whether an element of a given kind may be moved, selected,
//! hovered or edited. Every kind starts from the capabilities of its base view element; the
//! built-in suppressions then remove what does not make sense for a laid-out graph (positions
//! come from the layout engine, so nothing is draggable), and the widget config can remove more.

use crate::config::WidgetConfig;
use crate::scene::ElementKind;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Move,
    Select,
    Hover,
    Edit,
}

impl Feature {
    pub const ALL: [Feature; 4] = [Feature::Move, Feature::Select, Feature::Hover, Feature::Edit];

    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Move => "move",
            Feature::Select => "select",
            Feature::Hover => "hover",
            Feature::Edit => "edit",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|feature| feature.as_str() == s)
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FeatureSet(u8);

impl FeatureSet {
    pub const EMPTY: Self = Self(0);

    pub fn of(features: &[Feature]) -> Self {
        features
            .iter()
            .fold(Self::EMPTY, |set, feature| set.with(*feature))
    }

    pub fn contains(self, feature: Feature) -> bool {
        self.0 & feature.bit() != 0
    }

    #[must_use]
    pub fn with(self, feature: Feature) -> Self {
        Self(self.0 | feature.bit())
    }

    #[must_use]
    pub fn without(self, feature: Feature) -> Self {
        Self(self.0 & !feature.bit())
    }

    #[must_use]
    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Feature> {
        Feature::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

impl ElementKind {
    /// Capabilities of the view element this kind is rendered as.
    pub fn base_features(self) -> FeatureSet {
        use Feature::*;
        match self {
            ElementKind::Graph | ElementKind::Label => FeatureSet::EMPTY,
            ElementKind::Node | ElementKind::Defs | ElementKind::Def | ElementKind::Junction => {
                FeatureSet::of(&[Move, Select, Hover])
            }
            ElementKind::Port => FeatureSet::of(&[Select, Hover]),
            ElementKind::Edge => FeatureSet::of(&[Select, Hover, Edit]),
        }
    }

    /// Capabilities removed for laid-out graphs regardless of configuration.
    pub fn suppressed_features(self) -> FeatureSet {
        use Feature::*;
        match self {
            ElementKind::Node | ElementKind::Port | ElementKind::Defs | ElementKind::Def => {
                FeatureSet::of(&[Move])
            }
            ElementKind::Edge => FeatureSet::of(&[Edit]),
            ElementKind::Junction => FeatureSet::of(&[Move, Select, Hover]),
            ElementKind::Graph | ElementKind::Label => FeatureSet::EMPTY,
        }
    }
}

/// Capability lookup table keyed by element kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureTable {
    entries: [FeatureSet; ElementKind::ALL.len()],
}

impl Default for FeatureTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FeatureTable {
    pub fn builtin() -> Self {
        let mut entries = [FeatureSet::EMPTY; ElementKind::ALL.len()];
        for kind in ElementKind::ALL {
            entries[kind.index()] = kind.base_features().difference(kind.suppressed_features());
        }
        Self { entries }
    }

    /// The built-in table with every `features.<kind>.<feature> = false` override applied.
    ///
    /// A `true` override never re-enables a built-in suppression.
    pub fn from_config(config: &WidgetConfig) -> Self {
        let mut table = Self::builtin();
        for kind in ElementKind::ALL {
            for feature in Feature::ALL {
                if config.feature_override(kind, feature) == Some(false) {
                    table.suppress(kind, feature);
                }
            }
        }
        table
    }

    pub fn suppress(&mut self, kind: ElementKind, feature: Feature) {
        let entry = &mut self.entries[kind.index()];
        if entry.contains(feature) {
            tracing::debug!(%kind, %feature, "feature suppressed");
        }
        *entry = entry.without(feature);
    }

    pub fn features(&self, kind: ElementKind) -> FeatureSet {
        self.entries[kind.index()]
    }

    pub fn has_feature(&self, kind: ElementKind, feature: Feature) -> bool {
        self.features(kind).contains(feature)
    }
}

/// Serializes as `{ "<kind>": { "<feature>": bool, ... }, ... }`.
impl Serialize for FeatureTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Flags(FeatureSet);

        impl Serialize for Flags {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(Feature::ALL.len()))?;
                for feature in Feature::ALL {
                    map.serialize_entry(feature.as_str(), &self.0.contains(feature))?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(ElementKind::ALL.len()))?;
        for kind in ElementKind::ALL {
            map.serialize_entry(kind.as_str(), &Flags(self.features(kind)))?;
        }
        map.end()
    }
}
