//! A headless [`RenderEngine`] over a transformed scene graph.
//!
//! Tracks selection the way the diagram view does: only elements whose kind has the `select`
//! capability in the [`FeatureTable`] can be selected, and the selection keeps insertion order.

use crate::action::{Action, SelectAction};
use crate::host::{BoxError, RenderEngine, SelectedElement};
use elkwidget_core::{ElementKind, Feature, FeatureTable, SGraph};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

#[derive(Debug)]
pub struct SceneEngine {
    /// `(id, kind)` for every scene element, in document order.
    elements: Vec<(String, ElementKind)>,
    features: FeatureTable,
    selection: Rc<RefCell<IndexMap<String, ElementKind>>>,
}

impl SceneEngine {
    pub fn new(scene: &SGraph, features: FeatureTable) -> Self {
        let elements = scene
            .iter()
            .map(|element| (element.id().to_string(), element.kind()))
            .collect();
        Self {
            elements,
            features,
            selection: Rc::default(),
        }
    }

    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.borrow().contains_key(id)
    }

    /// Ids may repeat across namespaces; the first selectable element wins.
    fn selectable_kind(&self, id: &str) -> Option<ElementKind> {
        self.elements
            .iter()
            .find(|(element_id, kind)| {
                element_id == id && self.features.has_feature(*kind, Feature::Select)
            })
            .map(|(_, kind)| *kind)
    }
}

impl RenderEngine for SceneEngine {
    fn apply_select(&self, action: &SelectAction) -> Result<(), BoxError> {
        let mut selection = self.selection.borrow_mut();
        for id in &action.deselected_elements_ids {
            selection.shift_remove(id);
        }
        for id in &action.selected_elements_ids {
            match self.selectable_kind(id) {
                Some(kind) => {
                    selection.insert(id.clone(), kind);
                }
                None => tracing::debug!(id = %id, "element is not selectable"),
            }
        }
        Ok(())
    }

    fn get_selection(
        &self,
    ) -> impl Future<Output = Result<Vec<SelectedElement>, BoxError>> + 'static {
        let selection = Rc::clone(&self.selection);
        async move {
            let selected: Vec<SelectedElement> = selection
                .borrow()
                .iter()
                .map(|(id, kind)| SelectedElement {
                    id: id.clone(),
                    kind: *kind,
                })
                .collect();
            Ok::<_, BoxError>(selected)
        }
    }

    fn handle_default(&self, action: &Action) -> Result<(), BoxError> {
        tracing::debug!(kind = action.kind(), "default action handling");
        Ok(())
    }
}
