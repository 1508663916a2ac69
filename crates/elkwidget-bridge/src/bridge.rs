use crate::action::{Action, HOVER_FEEDBACK_KIND, SELECT_KIND, SelectAction};
use crate::host::{
    CommandChannel, HOVERED_ATTR, HostView, RenderEngine, SELECTED_ATTR, SelectCommand,
};
use crate::{Error, Result};
use futures::future::{FutureExt, LocalBoxFuture};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

/// Action kinds [`InteractionBridge::handle`] intercepts instead of passing to the engine.
pub const HANDLED_KINDS: [&str; 2] = [SELECT_KIND, HOVER_FEEDBACK_KIND];

/// Outcome of [`InteractionBridge::handle`].
#[derive(Debug)]
#[must_use = "a `Readback` dispatch must be driven for the host selection to update"]
pub enum Dispatch {
    /// Fully handled synchronously.
    Handled,
    /// Dropped because no host view is attached yet.
    Ignored,
    /// Passed to the engine's default handling.
    Delegated,
    /// Selection read-back still pending; the host event loop must drive it.
    Readback(SelectionReadback),
}

impl Dispatch {
    pub fn into_readback(self) -> Option<SelectionReadback> {
        match self {
            Dispatch::Readback(readback) => Some(readback),
            _ => None,
        }
    }
}

/// Pending read-back of the engine's full selection.
///
/// Resolves to the selected ids after they have been written to the host view's `"selected"`
/// attribute and the view has been touched.
#[must_use = "the host view is only updated once the read-back is polled to completion"]
pub struct SelectionReadback {
    inner: LocalBoxFuture<'static, Result<Vec<String>>>,
}

impl fmt::Debug for SelectionReadback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionReadback").finish_non_exhaustive()
    }
}

impl Future for SelectionReadback {
    type Output = Result<Vec<String>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

struct Attached<V, C> {
    view: Rc<V>,
    commands: Rc<C>,
}

/// Relays diagram interactions to the host view, and host selection changes back to the engine.
///
/// Until [`attach`](Self::attach) supplies the host view and command channel, every other call is
/// a logged no-op.
pub struct InteractionBridge<E, V, C> {
    engine: Rc<E>,
    host: Option<Attached<V, C>>,
}

impl<E, V, C> InteractionBridge<E, V, C>
where
    E: RenderEngine,
    V: HostView + 'static,
    C: CommandChannel,
{
    pub fn new(engine: Rc<E>) -> Self {
        Self { engine, host: None }
    }

    pub fn attach(&mut self, view: Rc<V>, commands: Rc<C>) {
        if self.host.is_some() {
            tracing::debug!("replacing attached host view");
        }
        self.host = Some(Attached { view, commands });
    }

    pub fn is_attached(&self) -> bool {
        self.host.is_some()
    }

    pub fn handled_kinds(&self) -> &'static [&'static str] {
        &HANDLED_KINDS
    }

    pub fn engine(&self) -> &Rc<E> {
        &self.engine
    }

    pub fn handle(&self, action: &Action) -> Result<Dispatch> {
        let Some(host) = &self.host else {
            tracing::warn!(kind = action.kind(), "no host view attached; action ignored");
            return Ok(Dispatch::Ignored);
        };
        tracing::debug!(kind = action.kind(), "dispatching action");

        match action {
            Action::Select(select) => self.handle_select(host, select).map(Dispatch::Readback),
            Action::HoverFeedback(hover) => {
                let hovered = if hover.mouse_is_over {
                    Value::String(hover.mouseover_element.clone())
                } else {
                    Value::Null
                };
                host.view.set_attribute(HOVERED_ATTR, hovered);
                host.view.touch();
                Ok(Dispatch::Handled)
            }
            // Laid-out elements keep their document order.
            Action::BringToFront(_) => Ok(Dispatch::Handled),
            other => {
                self.engine.handle_default(other).map_err(Error::Engine)?;
                Ok(Dispatch::Delegated)
            }
        }
    }

    /// Applies the selection delta, then publishes the engine's *full* selection rather than the
    /// delta, so the host attribute always mirrors what the view shows.
    fn handle_select(
        &self,
        host: &Attached<V, C>,
        select: &SelectAction,
    ) -> Result<SelectionReadback> {
        // The click notification does not depend on the engine accepting the update.
        host.view.handle_click(select);
        self.engine.apply_select(select).map_err(Error::Engine)?;

        let selection = self.engine.get_selection();
        let view = Rc::clone(&host.view);
        let inner = async move {
            let ids: Vec<String> = selection
                .await
                .map_err(Error::Engine)?
                .into_iter()
                .map(|element| element.id)
                .collect();
            tracing::debug!(selected = ids.len(), "selection read back");
            view.set_attribute(SELECTED_ATTR, Value::from(ids.clone()));
            view.touch();
            Ok::<_, Error>(ids)
        };
        Ok(SelectionReadback {
            inner: inner.boxed_local(),
        })
    }

    /// Pushes a host-side selection change into the engine as a select command.
    pub fn set_selection(&self, selected: Vec<String>, deselected: Vec<String>) -> Result<()> {
        let Some(host) = &self.host else {
            tracing::warn!("no host view attached; selection change ignored");
            return Ok(());
        };
        let command = SelectCommand::new(SelectAction::new(selected, deselected));
        tracing::debug!(
            selected = command.action.selected_elements_ids.len(),
            deselected = command.action.deselected_elements_ids.len(),
            "executing select command"
        );
        host.commands.execute(command).map_err(Error::Command)
    }
}
