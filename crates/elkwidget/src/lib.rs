#![forbid(unsafe_code)]

//! `elkwidget` turns graphs laid out by the ELK layout engine into the scene graph rendered by
//! an interactive diagram widget.
//!
//! # Features
//!
//! - `bridge`: the interaction bridge relaying selection and hover to a notebook host
//!   (`elkwidget::bridge`)

pub use elkwidget_core::*;

#[cfg(feature = "bridge")]
pub mod bridge {
    pub use elkwidget_bridge::*;
}

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error(transparent)]
    Transform(#[from] elkwidget_core::Error),
    #[cfg(feature = "bridge")]
    #[error(transparent)]
    Bridge(#[from] elkwidget_bridge::Error),
}

pub type WidgetResult<T> = std::result::Result<T, WidgetError>;

/// Converts an arbitrary string into a conservative id token for prefixing definition ids.
///
/// Several widgets can share one page, and their definitions end up in one id space, so the
/// prefix must be usable inside element ids and `url(#...)` references:
/// - surrounding whitespace is trimmed
/// - characters outside `[A-Za-z0-9_-]` become `_`
/// - a prefix that does not start with an ASCII letter gets `elk_` prepended
pub fn sanitize_id_prefix(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return DEFAULT_ID_PREFIX.to_string();
    }

    let mut out: String = raw
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();

    while out.contains("__") {
        out = out.replace("__", "_");
    }
    let out = out.trim_matches('_');
    if out.is_empty() {
        return DEFAULT_ID_PREFIX.to_string();
    }
    if !out.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return format!("{DEFAULT_ID_PREFIX}_{out}");
    }
    out.to_string()
}

/// Bundles a transformer with a widget config, so callers do not thread the prefix and feature
/// overrides through every call.
#[derive(Debug, Clone, Default)]
pub struct WidgetRenderer {
    pub transformer: ElkGraphTransformer,
    pub config: WidgetConfig,
}

impl WidgetRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: WidgetConfig) -> Self {
        self.config = config;
        self
    }

    /// The config's `idPrefix`, sanitized.
    pub fn id_prefix(&self) -> String {
        sanitize_id_prefix(self.config.id_prefix())
    }

    /// Built-in capability table with the config's feature overrides applied.
    pub fn features(&self) -> FeatureTable {
        FeatureTable::from_config(&self.config)
    }

    pub fn render_scene(&self, graph: &ElkNode, defs: &ElkDefs) -> WidgetResult<SGraph> {
        let id_prefix = self.id_prefix();
        tracing::debug!(%id_prefix, "rendering scene");
        Ok(self.transformer.transform(graph, defs, &id_prefix)?)
    }

    /// JSON-in, JSON-out variant of [`Self::render_scene`]; `null` defs count as empty.
    pub fn render_scene_json(&self, graph: &Value, defs: &Value) -> WidgetResult<Value> {
        let id_prefix = self.id_prefix();
        tracing::debug!(%id_prefix, "rendering scene from json");
        Ok(transform_json(graph, defs, &id_prefix)?)
    }
}

/// Transforms `graph` using the prefix from `config`.
pub fn render_scene(
    graph: &ElkNode,
    defs: &ElkDefs,
    config: &WidgetConfig,
) -> WidgetResult<SGraph> {
    WidgetRenderer::new()
        .with_config(config.clone())
        .render_scene(graph, defs)
}

pub fn render_scene_json(
    graph: &Value,
    defs: &Value,
    config: &WidgetConfig,
) -> WidgetResult<Value> {
    WidgetRenderer::new()
        .with_config(config.clone())
        .render_scene_json(graph, defs)
}
