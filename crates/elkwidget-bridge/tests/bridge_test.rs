use elkwidget_bridge::{
    Action, BoxError, CommandChannel, Dispatch, Error, HostView, InteractionBridge, RenderEngine,
    SelectAction, SelectCommand, SelectedElement,
};
use elkwidget_core::ElementKind;
use futures::executor::{LocalPool, block_on};
use futures::task::LocalSpawnExt;
use serde_json::{Map, Value, json};
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

#[derive(Debug)]
struct Failure(&'static str);

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for Failure {}

#[derive(Default)]
struct FakeEngine {
    selection: Rc<RefCell<Vec<String>>>,
    applied: RefCell<Vec<SelectAction>>,
    defaults: RefCell<Vec<String>>,
    fail_readback: Cell<bool>,
    fail_apply: Cell<bool>,
}

impl RenderEngine for FakeEngine {
    fn apply_select(&self, action: &SelectAction) -> Result<(), BoxError> {
        if self.fail_apply.get() {
            return Err(Box::new(Failure("select rejected")));
        }
        self.applied.borrow_mut().push(action.clone());
        let mut selection = self.selection.borrow_mut();
        selection.retain(|id| !action.deselected_elements_ids.contains(id));
        for id in &action.selected_elements_ids {
            if !selection.contains(id) {
                selection.push(id.clone());
            }
        }
        Ok(())
    }

    fn get_selection(
        &self,
    ) -> impl Future<Output = Result<Vec<SelectedElement>, BoxError>> + 'static {
        let selection = Rc::clone(&self.selection);
        let fail = self.fail_readback.get();
        async move {
            if fail {
                return Err::<_, BoxError>(Box::new(Failure("selection unavailable")));
            }
            let selected: Vec<SelectedElement> = selection
                .borrow()
                .iter()
                .map(|id| SelectedElement {
                    id: id.clone(),
                    kind: ElementKind::Node,
                })
                .collect();
            Ok(selected)
        }
    }

    fn handle_default(&self, action: &Action) -> Result<(), BoxError> {
        self.defaults.borrow_mut().push(action.kind().to_string());
        Ok(())
    }
}

#[derive(Default)]
struct FakeView {
    attributes: RefCell<Map<String, Value>>,
    touches: Cell<usize>,
    clicks: RefCell<Vec<SelectAction>>,
}

impl FakeView {
    fn attribute(&self, key: &str) -> Option<Value> {
        self.attributes.borrow().get(key).cloned()
    }
}

impl HostView for FakeView {
    fn set_attribute(&self, key: &str, value: Value) {
        self.attributes.borrow_mut().insert(key.to_string(), value);
    }

    fn touch(&self) {
        self.touches.set(self.touches.get() + 1);
    }

    fn handle_click(&self, action: &SelectAction) {
        self.clicks.borrow_mut().push(action.clone());
    }
}

#[derive(Default)]
struct FakeChannel {
    executed: RefCell<Vec<SelectCommand>>,
    fail: Cell<bool>,
}

impl CommandChannel for FakeChannel {
    fn execute(&self, command: SelectCommand) -> Result<(), BoxError> {
        if self.fail.get() {
            return Err(Box::new(Failure("channel closed")));
        }
        self.executed.borrow_mut().push(command);
        Ok(())
    }
}

type Bridge = InteractionBridge<FakeEngine, FakeView, FakeChannel>;

fn attached() -> (Bridge, Rc<FakeView>, Rc<FakeChannel>) {
    let view = Rc::new(FakeView::default());
    let channel = Rc::new(FakeChannel::default());
    let mut bridge = InteractionBridge::new(Rc::new(FakeEngine::default()));
    bridge.attach(Rc::clone(&view), Rc::clone(&channel));
    (bridge, view, channel)
}

fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn set_selection_executes_exactly_one_select_command() {
    let (bridge, _view, channel) = attached();
    bridge.set_selection(ids(&["n1"]), vec![]).unwrap();

    let executed = channel.executed.borrow();
    assert_eq!(executed.len(), 1);
    assert_eq!(executed[0].action.selected_elements_ids, ids(&["n1"]));
    assert!(executed[0].action.deselected_elements_ids.is_empty());
}

#[test]
fn select_publishes_full_selection_not_the_delta() {
    let (bridge, view, _channel) = attached();

    let first = bridge.handle(&Action::select(ids(&["a"]), vec![])).unwrap();
    let selected = block_on(first.into_readback().unwrap()).unwrap();
    assert_eq!(selected, ids(&["a"]));

    let second = bridge.handle(&Action::select(ids(&["b"]), vec![])).unwrap();
    let selected = block_on(second.into_readback().unwrap()).unwrap();
    assert_eq!(selected, ids(&["a", "b"]));

    assert_eq!(view.attribute("selected"), Some(json!(["a", "b"])));
    assert_eq!(view.touches.get(), 2);
}

#[test]
fn select_notifies_click_before_the_readback_resolves() {
    let (bridge, view, _channel) = attached();
    let action = Action::select(ids(&["n1"]), ids(&["n0"]));

    let readback = bridge.handle(&action).unwrap().into_readback().unwrap();
    assert_eq!(
        *view.clicks.borrow(),
        vec![SelectAction::new(ids(&["n1"]), ids(&["n0"]))]
    );
    assert_eq!(view.attribute("selected"), None);
    assert_eq!(view.touches.get(), 0);

    block_on(readback).unwrap();
    assert_eq!(view.attribute("selected"), Some(json!(["n1"])));
    assert_eq!(view.touches.get(), 1);
    assert_eq!(bridge.engine().applied.borrow().len(), 1);
}

#[test]
fn hover_sets_and_clears_the_hovered_attribute() {
    let (bridge, view, _channel) = attached();

    let dispatch = bridge.handle(&Action::hover("n2", true)).unwrap();
    assert!(matches!(dispatch, Dispatch::Handled));
    assert_eq!(view.attribute("hovered"), Some(json!("n2")));
    assert_eq!(view.touches.get(), 1);

    let dispatch = bridge.handle(&Action::hover("n2", false)).unwrap();
    assert!(matches!(dispatch, Dispatch::Handled));
    assert_eq!(view.attribute("hovered"), Some(Value::Null));
    assert_eq!(view.touches.get(), 2);
}

#[test]
fn hover_applied_while_readback_is_pending() {
    let (bridge, view, _channel) = attached();
    let mut pool = LocalPool::new();

    let readback = bridge
        .handle(&Action::select(ids(&["n1"]), vec![]))
        .unwrap()
        .into_readback()
        .unwrap();
    pool.spawner()
        .spawn_local(async move {
            readback.await.unwrap();
        })
        .unwrap();

    let dispatch = bridge.handle(&Action::hover("n3", true)).unwrap();
    assert!(matches!(dispatch, Dispatch::Handled));
    assert_eq!(view.attribute("hovered"), Some(json!("n3")));
    assert_eq!(view.attribute("selected"), None);

    pool.run();
    assert_eq!(view.attribute("selected"), Some(json!(["n1"])));
    assert_eq!(view.attribute("hovered"), Some(json!("n3")));
    assert_eq!(view.touches.get(), 2);
}

#[test]
fn bring_to_front_is_a_no_op() {
    let (bridge, view, _channel) = attached();
    let action =
        Action::from_value(json!({ "kind": "bringToFront", "elementIDs": ["n1"] })).unwrap();

    let dispatch = bridge.handle(&action).unwrap();
    assert!(matches!(dispatch, Dispatch::Handled));
    assert!(view.attributes.borrow().is_empty());
    assert_eq!(view.touches.get(), 0);
    assert!(bridge.engine().defaults.borrow().is_empty());
}

#[test]
fn other_actions_are_delegated_to_the_engine() {
    let (bridge, view, _channel) = attached();
    let action = Action::from_value(json!({ "kind": "fit", "padding": 10 })).unwrap();

    let dispatch = bridge.handle(&action).unwrap();
    assert!(matches!(dispatch, Dispatch::Delegated));
    assert_eq!(*bridge.engine().defaults.borrow(), vec!["fit".to_string()]);
    assert_eq!(view.touches.get(), 0);
}

#[test]
fn calls_before_attach_are_ignored() {
    let bridge: Bridge = InteractionBridge::new(Rc::new(FakeEngine::default()));
    assert!(!bridge.is_attached());

    let dispatch = bridge.handle(&Action::select(ids(&["n1"]), vec![])).unwrap();
    assert!(matches!(dispatch, Dispatch::Ignored));
    assert!(bridge.engine().applied.borrow().is_empty());

    let dispatch = bridge.handle(&Action::hover("n1", true)).unwrap();
    assert!(matches!(dispatch, Dispatch::Ignored));

    bridge.set_selection(ids(&["n1"]), vec![]).unwrap();
}

#[test]
fn readback_failure_propagates_and_leaves_view_untouched() {
    let (bridge, view, _channel) = attached();
    bridge.engine().fail_readback.set(true);

    let readback = bridge
        .handle(&Action::select(ids(&["n1"]), vec![]))
        .unwrap()
        .into_readback()
        .unwrap();
    let err = block_on(readback).unwrap_err();

    assert!(matches!(err, Error::Engine(_)), "got {err:?}");
    assert_eq!(err.to_string(), "render engine error: selection unavailable");
    assert_eq!(view.attribute("selected"), None);
    assert_eq!(view.touches.get(), 0);
}

#[test]
fn command_channel_failure_propagates() {
    let (bridge, _view, channel) = attached();
    channel.fail.set(true);

    let err = bridge.set_selection(ids(&["n1"]), vec![]).unwrap_err();
    assert!(matches!(err, Error::Command(_)), "got {err:?}");
    let source = std::error::Error::source(&err).expect("boxed source");
    assert_eq!(source.to_string(), "channel closed");
}

#[test]
fn bridge_advertises_intercepted_kinds() {
    let (bridge, _view, _channel) = attached();
    assert_eq!(bridge.handled_kinds(), &["elementSelected", "hoverFeedback"]);
}

#[test]
fn click_is_notified_even_when_the_engine_rejects_the_select() {
    let (bridge, view, _channel) = attached();
    bridge.engine().fail_apply.set(true);

    let err = bridge
        .handle(&Action::select(ids(&["n1"]), vec![]))
        .unwrap_err();

    assert!(matches!(err, Error::Engine(_)), "got {err:?}");
    assert_eq!(err.to_string(), "render engine error: select rejected");
    assert_eq!(
        *view.clicks.borrow(),
        vec![SelectAction::new(ids(&["n1"]), vec![])]
    );
    assert_eq!(view.attribute("selected"), None);
    assert_eq!(view.touches.get(), 0);
}
