//! Contracts the bridge talks to: the notebook host view, its command channel, and the rendering
//! engine. All three are owned elsewhere and shared with the bridge through `Rc`.

use crate::action::{Action, SelectAction};
use elkwidget_core::ElementKind;
use serde_json::Value;
use std::future::Future;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Host attribute holding the full list of selected element ids.
pub const SELECTED_ATTR: &str = "selected";
/// Host attribute holding the hovered element id, or `null`.
pub const HOVERED_ATTR: &str = "hovered";

/// Observable attribute store on the host side.
pub trait HostView {
    fn set_attribute(&self, key: &str, value: Value);

    /// Notify observers that attributes changed.
    fn touch(&self);

    /// Raw selection notification, used by the host for click semantics.
    fn handle_click(&self, action: &SelectAction);
}

/// An executable selection change pushed from the host into the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectCommand {
    pub action: SelectAction,
}

impl SelectCommand {
    pub fn new(action: SelectAction) -> Self {
        Self { action }
    }
}

pub trait CommandChannel {
    fn execute(&self, command: SelectCommand) -> Result<(), BoxError>;
}

/// One entry of the engine's current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedElement {
    pub id: String,
    pub kind: ElementKind,
}

pub trait RenderEngine {
    /// The engine's built-in selection-state update.
    fn apply_select(&self, action: &SelectAction) -> Result<(), BoxError>;

    /// Reads the full current selection. The returned future must not borrow the engine.
    fn get_selection(
        &self,
    ) -> impl Future<Output = Result<Vec<SelectedElement>, BoxError>> + 'static;

    /// Fallback for every action the bridge does not intercept.
    fn handle_default(&self, action: &Action) -> Result<(), BoxError>;
}
