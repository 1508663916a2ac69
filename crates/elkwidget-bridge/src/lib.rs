#![forbid(unsafe_code)]

//! Interaction bridge for the ELK diagram widget.
//!
//! Sits between the diagram view's action stream and the notebook host. Selection and hover
//! changes flow out to the host view's observable attributes; host selection changes flow back
//! into the engine as select commands.

pub mod action;
pub mod bridge;
pub mod error;
pub mod host;
pub mod scene_engine;

pub use action::{
    Action, BRING_TO_FRONT_KIND, BringToFrontAction, GenericAction, HOVER_FEEDBACK_KIND,
    HoverFeedbackAction, SELECT_KIND, SelectAction,
};
pub use bridge::{Dispatch, HANDLED_KINDS, InteractionBridge, SelectionReadback};
pub use error::{Error, Result};
pub use host::{
    BoxError, CommandChannel, HOVERED_ATTR, HostView, RenderEngine, SELECTED_ATTR, SelectCommand,
    SelectedElement,
};
pub use scene_engine::SceneEngine;
