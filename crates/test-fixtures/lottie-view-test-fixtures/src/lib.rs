//! Recording doubles for driving `lottie-view-core` in tests.
//!
//! [`RecordingEngine`] hands out [`RecordingHandle`]s that append every
//! imperative call to a shared, ordered [`CallLog`] and keep their listener
//! table and destroyed flag observable after the handle has moved into a
//! view.

use std::cell::RefCell;
use std::rc::Rc;

use lottie_view_core::{
    AnimationEngine, AnimationEvent, AnimationHandle, Callback, EventKind, PlayerConfig, ViewError,
};
use serde_json::{json, Value};

/// One imperative call observed by a recording handle.
#[derive(Debug, Clone, PartialEq)]
pub enum HandleCall {
    Play,
    Pause,
    Stop,
    SetDirection(i8),
    SetSpeed(f64),
    AddListener(EventKind),
    RemoveListener(EventKind),
    Destroy,
}

impl HandleCall {
    /// Check whether this is a playback-control call (everything except
    /// listener management).
    pub fn is_playback_call(&self) -> bool {
        !matches!(self, Self::AddListener(_) | Self::RemoveListener(_))
    }
}

/// Shared, ordered log of handle calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<HandleCall>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: HandleCall) {
        self.0.borrow_mut().push(call);
    }

    /// Everything recorded so far, oldest first
    pub fn calls(&self) -> Vec<HandleCall> {
        self.0.borrow().clone()
    }

    /// Drain the log, returning what was recorded
    pub fn take(&self) -> Vec<HandleCall> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Number of recorded calls equal to `call`
    pub fn count(&self, call: &HandleCall) -> usize {
        self.0.borrow().iter().filter(|c| *c == call).count()
    }

    /// Number of recorded calls matching a predicate
    pub fn count_matching(&self, predicate: impl Fn(&HandleCall) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| predicate(c)).count()
    }
}

/// Observable state of one handle, shared between the handle (owned by the
/// view) and the test (via [`RecordingEngine::last_handle`]).
#[derive(Default)]
pub struct HandleState {
    listeners: Vec<(EventKind, Callback)>,
    destroyed: bool,
}

impl HandleState {
    pub fn destroyed(&self) -> bool {
        self.destroyed
    }

    /// Number of listeners registered under a slot
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|(k, _)| *k == kind).count()
    }

    /// Check whether a specific callback (by identity) is registered
    pub fn has_listener(&self, kind: EventKind, callback: &Callback) -> bool {
        self.listeners
            .iter()
            .any(|(k, cb)| *k == kind && cb.ptr_eq(callback))
    }

    /// Callbacks registered under a slot, in registration order
    pub fn listeners_for(&self, kind: EventKind) -> Vec<Callback> {
        self.listeners
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, cb)| cb.clone())
            .collect()
    }
}

/// Fire a native event into every listener registered for its slot.
pub fn emit(state: &Rc<RefCell<HandleState>>, event: &AnimationEvent) {
    let listeners = state.borrow().listeners_for(event.kind);
    for callback in listeners {
        callback.call(event);
    }
}

/// Handle double that records calls and tracks live listeners by identity.
pub struct RecordingHandle {
    log: CallLog,
    state: Rc<RefCell<HandleState>>,
}

impl AnimationHandle for RecordingHandle {
    fn play(&mut self) {
        self.log.push(HandleCall::Play);
    }

    fn pause(&mut self) {
        self.log.push(HandleCall::Pause);
    }

    fn stop(&mut self) {
        self.log.push(HandleCall::Stop);
    }

    fn set_direction(&mut self, direction: i8) {
        self.log.push(HandleCall::SetDirection(direction));
    }

    fn set_speed(&mut self, speed: f64) {
        self.log.push(HandleCall::SetSpeed(speed));
    }

    fn add_event_listener(&mut self, kind: EventKind, callback: Callback) {
        self.log.push(HandleCall::AddListener(kind));
        self.state.borrow_mut().listeners.push((kind, callback));
    }

    fn remove_event_listener(&mut self, kind: EventKind, callback: &Callback) {
        self.log.push(HandleCall::RemoveListener(kind));
        self.state
            .borrow_mut()
            .listeners
            .retain(|(k, cb)| !(*k == kind && cb.ptr_eq(callback)));
    }

    fn destroy(&mut self) {
        self.log.push(HandleCall::Destroy);
        let mut state = self.state.borrow_mut();
        state.destroyed = true;
        state.listeners.clear();
    }
}

/// Engine double: records every configuration it is asked to load and keeps
/// a window into each handle it produced.
#[derive(Default)]
pub struct RecordingEngine {
    log: CallLog,
    configs: Vec<PlayerConfig>,
    states: Vec<Rc<RefCell<HandleState>>>,
    fail_message: Option<String>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared call log all handles from this engine append to
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// Configurations seen so far, oldest first
    pub fn configs(&self) -> &[PlayerConfig] {
        &self.configs
    }

    pub fn last_config(&self) -> Option<&PlayerConfig> {
        self.configs.last()
    }

    /// Observable state of the most recently produced handle
    pub fn last_handle(&self) -> Option<Rc<RefCell<HandleState>>> {
        self.states.last().cloned()
    }

    /// Make the next `load` fail with an engine error
    pub fn fail_with(&mut self, message: impl Into<String>) {
        self.fail_message = Some(message.into());
    }
}

impl AnimationEngine for RecordingEngine {
    type Handle = RecordingHandle;

    fn load(&mut self, config: PlayerConfig) -> Result<RecordingHandle, ViewError> {
        if let Some(message) = self.fail_message.take() {
            return Err(ViewError::Engine { message });
        }
        self.configs.push(config);
        let state = Rc::new(RefCell::new(HandleState::default()));
        self.states.push(state.clone());
        Ok(RecordingHandle {
            log: self.log.clone(),
            state,
        })
    }
}

/// Minimal animation document, enough for a data-sourced configuration.
pub fn sample_document() -> Value {
    json!({
        "v": "5.7.4",
        "fr": 60,
        "ip": 0,
        "op": 120,
        "w": 512,
        "h": 512,
        "nm": "pulse",
        "layers": []
    })
}
