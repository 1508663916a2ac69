//! Diagram-view actions, in the engine's JSON wire shape.
//!
//! Every action is a JSON object discriminated by `kind`. The three kinds the bridge cares about
//! are typed; anything else is kept as a [`GenericAction`] carrying its raw payload so it can be
//! handed back to the engine untouched.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

pub const SELECT_KIND: &str = "elementSelected";
pub const HOVER_FEEDBACK_KIND: &str = "hoverFeedback";
pub const BRING_TO_FRONT_KIND: &str = "bringToFront";

/// Selection delta: ids to add to and remove from the current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectAction {
    #[serde(rename = "selectedElementsIDs", default)]
    pub selected_elements_ids: Vec<String>,
    #[serde(rename = "deselectedElementsIDs", default)]
    pub deselected_elements_ids: Vec<String>,
}

impl SelectAction {
    pub fn new(selected: Vec<String>, deselected: Vec<String>) -> Self {
        Self {
            selected_elements_ids: selected,
            deselected_elements_ids: deselected,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverFeedbackAction {
    pub mouseover_element: String,
    pub mouse_is_over: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BringToFrontAction {
    #[serde(rename = "elementIDs", default)]
    pub element_ids: Vec<String>,
}

/// An action of a kind the bridge does not interpret.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericAction {
    pub kind: String,
    pub payload: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Select(SelectAction),
    HoverFeedback(HoverFeedbackAction),
    BringToFront(BringToFrontAction),
    Other(GenericAction),
}

impl Action {
    pub fn select(selected: Vec<String>, deselected: Vec<String>) -> Self {
        Action::Select(SelectAction::new(selected, deselected))
    }

    pub fn hover(element_id: impl Into<String>, mouse_is_over: bool) -> Self {
        Action::HoverFeedback(HoverFeedbackAction {
            mouseover_element: element_id.into(),
            mouse_is_over,
        })
    }

    pub fn kind(&self) -> &str {
        match self {
            Action::Select(_) => SELECT_KIND,
            Action::HoverFeedback(_) => HOVER_FEEDBACK_KIND,
            Action::BringToFront(_) => BRING_TO_FRONT_KIND,
            Action::Other(action) => &action.kind,
        }
    }

    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(serde_json::Error::custom("action must be a JSON object"));
        };
        let kind = match map.remove("kind") {
            Some(Value::String(kind)) => kind,
            _ => return Err(serde_json::Error::custom("action is missing a string `kind`")),
        };

        Ok(match kind.as_str() {
            SELECT_KIND => Action::Select(serde_json::from_value(Value::Object(map))?),
            HOVER_FEEDBACK_KIND => {
                Action::HoverFeedback(serde_json::from_value(Value::Object(map))?)
            }
            BRING_TO_FRONT_KIND => Action::BringToFront(serde_json::from_value(Value::Object(map))?),
            _ => Action::Other(GenericAction { kind, payload: map }),
        })
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

#[derive(Serialize)]
struct Tagged<'a, T: Serialize> {
    kind: &'a str,
    #[serde(flatten)]
    body: &'a T,
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();
        match self {
            Action::Select(body) => Tagged { kind, body }.serialize(serializer),
            Action::HoverFeedback(body) => Tagged { kind, body }.serialize(serializer),
            Action::BringToFront(body) => Tagged { kind, body }.serialize(serializer),
            Action::Other(action) => Tagged {
                kind,
                body: &action.payload,
            }
            .serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Action::from_value(value).map_err(D::Error::custom)
    }
}
