//! In-memory stand-ins for the page, the backend, the clipboard and timers.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::oneshot;

use paperdesk::api::Backend;
use paperdesk::platform::{Clipboard, Timer};
use paperdesk::render::{Element, Node};
use paperdesk::view::{ids, View};
use paperdesk::{ApiError, ClipboardError, CondenseResult, Controller, ParseTablesResult};

// ---------------------------------------------------------------- view

#[derive(Default)]
struct ViewState {
    values: HashMap<String, String>,
    texts: HashMap<String, String>,
    disabled: HashSet<String>,
    children: HashMap<String, Vec<Node>>,
}

/// Page model keyed by element id. Rendering children registers every
/// descendant id, the way inserting them into a document would.
#[derive(Clone, Default)]
pub struct FakeView {
    state: Rc<RefCell<ViewState>>,
}

impl FakeView {
    pub fn is_disabled(&self, id: &str) -> bool {
        self.state.borrow().disabled.contains(id)
    }

    pub fn children(&self, id: &str) -> Vec<Node> {
        self.state
            .borrow()
            .children
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn texts(&self) -> HashMap<String, String> {
        self.state.borrow().texts.clone()
    }

    fn register(state: &mut ViewState, el: &Element) {
        if let Some(id) = el.id() {
            if let Some(value) = &el.value {
                state.values.insert(id.to_string(), value.clone());
            }
            state.texts.insert(id.to_string(), el.text_content());
        }
        for child in el.children.iter().filter_map(Node::as_element) {
            Self::register(state, child);
        }
    }
}

impl View for FakeView {
    fn value(&self, id: &str) -> String {
        self.state
            .borrow()
            .values
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    fn set_value(&self, id: &str, value: &str) {
        self.state
            .borrow_mut()
            .values
            .insert(id.to_string(), value.to_string());
    }

    fn text(&self, id: &str) -> String {
        self.state
            .borrow()
            .texts
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    fn set_text(&self, id: &str, text: &str) {
        self.state
            .borrow_mut()
            .texts
            .insert(id.to_string(), text.to_string());
    }

    fn set_disabled(&self, id: &str, disabled: bool) {
        let mut state = self.state.borrow_mut();
        if disabled {
            state.disabled.insert(id.to_string());
        } else {
            state.disabled.remove(id);
        }
    }

    fn replace_children(&self, id: &str, nodes: &[Node]) {
        let mut state = self.state.borrow_mut();
        for el in nodes.iter().filter_map(Node::as_element) {
            Self::register(&mut state, el);
        }
        state.children.insert(id.to_string(), nodes.to_vec());
    }
}

// ------------------------------------------------------------- backend

#[derive(Default)]
struct BackendState {
    condense_reply: Option<Result<CondenseResult, ApiError>>,
    parse_reply: Option<Result<ParseTablesResult, ApiError>>,
    condense_calls: Vec<String>,
    parse_calls: Vec<String>,
    /// (process button disabled, parse button disabled) at each call
    buttons_at_call: Vec<(bool, bool)>,
}

/// Canned replies; records what it was sent and the button states it saw.
#[derive(Clone)]
pub struct FakeBackend {
    state: Rc<RefCell<BackendState>>,
    view: FakeView,
}

impl FakeBackend {
    pub fn new(view: FakeView) -> Self {
        Self {
            state: Rc::default(),
            view,
        }
    }

    pub fn reply_condense(&self, reply: Result<CondenseResult, ApiError>) {
        self.state.borrow_mut().condense_reply = Some(reply);
    }

    pub fn reply_parse(&self, reply: Result<ParseTablesResult, ApiError>) {
        self.state.borrow_mut().parse_reply = Some(reply);
    }

    pub fn condense_calls(&self) -> Vec<String> {
        self.state.borrow().condense_calls.clone()
    }

    pub fn parse_calls(&self) -> Vec<String> {
        self.state.borrow().parse_calls.clone()
    }

    pub fn buttons_at_call(&self) -> Vec<(bool, bool)> {
        self.state.borrow().buttons_at_call.clone()
    }

    fn record_buttons(&self) {
        let seen = (
            self.view.is_disabled(ids::PROCESS_ARTICLE_BTN),
            self.view.is_disabled(ids::PARSE_TABLES_BTN),
        );
        self.state.borrow_mut().buttons_at_call.push(seen);
    }
}

#[async_trait(?Send)]
impl Backend for FakeBackend {
    async fn condense(&self, text: &str) -> Result<CondenseResult, ApiError> {
        self.record_buttons();
        let mut state = self.state.borrow_mut();
        state.condense_calls.push(text.to_string());
        state
            .condense_reply
            .clone()
            .unwrap_or_else(|| Err(ApiError::Transport("no reply configured".into())))
    }

    async fn parse_tables(&self, markdown: &str) -> Result<ParseTablesResult, ApiError> {
        self.record_buttons();
        let mut state = self.state.borrow_mut();
        state.parse_calls.push(markdown.to_string());
        state
            .parse_reply
            .clone()
            .unwrap_or_else(|| Err(ApiError::Transport("no reply configured".into())))
    }
}

// ----------------------------------------------------------- clipboard

#[derive(Clone, Default)]
pub struct FakeClipboard {
    writes: Rc<RefCell<Vec<String>>>,
    fail: Rc<RefCell<bool>>,
}

impl FakeClipboard {
    pub fn failing() -> Self {
        let clip = Self::default();
        *clip.fail.borrow_mut() = true;
        clip
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Clipboard for FakeClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if *self.fail.borrow() {
            return Err(ClipboardError::Unavailable);
        }
        self.writes.borrow_mut().push(text.to_string());
        Ok(())
    }
}

// -------------------------------------------------------------- timers

/// Returns at once, recording the duration and every element's text at
/// the moment the sleep began.
#[derive(Clone)]
pub struct SnapshotTimer {
    view: FakeView,
    seen: Rc<RefCell<Vec<(Duration, HashMap<String, String>)>>>,
}

impl SnapshotTimer {
    pub fn new(view: FakeView) -> Self {
        Self {
            view,
            seen: Rc::default(),
        }
    }

    pub fn seen(&self) -> Vec<(Duration, HashMap<String, String>)> {
        self.seen.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Timer for SnapshotTimer {
    async fn sleep(&self, duration: Duration) {
        self.seen.borrow_mut().push((duration, self.view.texts()));
    }
}

/// Sleeps until the test fires it, oldest first.
#[derive(Clone, Default)]
pub struct ManualTimer {
    pending: Rc<RefCell<VecDeque<oneshot::Sender<()>>>>,
}

impl ManualTimer {
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn fire_next(&self) {
        if let Some(tx) = self.pending.borrow_mut().pop_front() {
            let _ = tx.send(());
        }
    }
}

#[async_trait(?Send)]
impl Timer for ManualTimer {
    async fn sleep(&self, _duration: Duration) {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push_back(tx);
        let _ = rx.await;
    }
}

// ------------------------------------------------------------- harness

pub struct Harness {
    pub view: FakeView,
    pub backend: FakeBackend,
    pub clipboard: FakeClipboard,
    pub timer: SnapshotTimer,
    pub controller: Controller,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_clipboard(FakeClipboard::default())
    }

    pub fn with_clipboard(clipboard: FakeClipboard) -> Self {
        let view = FakeView::default();
        let backend = FakeBackend::new(view.clone());
        let timer = SnapshotTimer::new(view.clone());
        let controller = Controller::new(
            Box::new(backend.clone()),
            Box::new(view.clone()),
            Box::new(clipboard.clone()),
            Box::new(timer.clone()),
        );
        Self {
            view,
            backend,
            clipboard,
            timer,
            controller,
        }
    }
}
