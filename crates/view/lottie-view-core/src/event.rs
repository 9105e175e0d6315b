//! Event binding table and callback plumbing.
//!
//! The engine exposes nine named events; a view binds one caller-supplied
//! callback to each. Callbacks are compared by identity so re-rendering with
//! the same function never churns listeners.

use std::fmt;
use std::rc::Rc;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Engine events a view can observe, one slot per callback prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum EventKind {
    /// A new frame was entered
    EnterFrame,
    /// One loop iteration finished
    LoopComplete,
    /// Playback finished for good
    Complete,
    /// A segment began playing
    SegmentStart,
    /// The underlying instance was destroyed
    Destroy,
    /// The engine parsed its configuration
    ConfigReady,
    /// The animation document finished loading
    DataReady,
    /// The engine finished building its DOM
    DomLoaded,
    /// The engine reported a failure
    Error,
}

impl EventKind {
    /// Every slot in the binding table, in registration order.
    pub const ALL: [EventKind; 9] = [
        Self::EnterFrame,
        Self::LoopComplete,
        Self::Complete,
        Self::SegmentStart,
        Self::Destroy,
        Self::ConfigReady,
        Self::DataReady,
        Self::DomLoaded,
        Self::Error,
    ];

    /// Native event name the engine listens under.
    #[inline]
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::EnterFrame => "enterFrame",
            Self::LoopComplete => "loopComplete",
            Self::Complete => "complete",
            Self::SegmentStart => "segmentStart",
            Self::Destroy => "destroy",
            Self::ConfigReady => "config_ready",
            Self::DataReady => "data_ready",
            Self::DomLoaded => "DOMLoaded",
            Self::Error => "error",
        }
    }

    /// Prop-surface name of the callback slot bound to this event.
    #[inline]
    pub fn slot_name(&self) -> &'static str {
        match self {
            Self::EnterFrame => "enterFrame",
            Self::LoopComplete => "loopComplete",
            Self::Complete => "complete",
            Self::SegmentStart => "segmentStart",
            Self::Destroy => "destroy",
            Self::ConfigReady => "configReady",
            Self::DataReady => "dataReady",
            Self::DomLoaded => "domLoaded",
            Self::Error => "error",
        }
    }

    /// Look a slot up by the engine's native event name.
    pub fn from_native(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.native_name() == name)
    }
}

/// Payload delivered to view callbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationEvent {
    /// Slot this event fired on
    pub kind: EventKind,
    /// Frame the playhead was on, when the engine reports one
    pub frame: Option<f64>,
    /// Human-readable message
    pub message: Option<String>,
    /// Additional event-specific data
    #[serde(default)]
    pub data: HashMap<String, String>,
}

impl AnimationEvent {
    /// Create a new event for a slot
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            frame: None,
            message: None,
            data: HashMap::new(),
        }
    }

    /// Set the frame the playhead was on
    #[inline]
    pub fn with_frame(mut self, frame: f64) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Set the message
    #[inline]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Add event data
    #[inline]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Get event data
    #[inline]
    pub fn get_data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(|s| s.as_str())
    }
}

thread_local! {
    // All default slots share one no-op so freshly built prop sets diff
    // clean against each other.
    static NOOP: Callback = Callback(Rc::new(|_: &AnimationEvent| {}));
}

/// Caller-supplied reaction to one engine event.
///
/// Compared by identity, never by value: a clone is the same callback, two
/// separately built closures are different ones even if their code matches.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn(&AnimationEvent)>);

impl Callback {
    /// Wrap a closure
    pub fn new(f: impl Fn(&AnimationEvent) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// The shared do-nothing callback every slot defaults to.
    pub fn noop() -> Self {
        NOOP.with(Callback::clone)
    }

    /// Invoke the callback
    #[inline]
    pub fn call(&self, event: &AnimationEvent) {
        (self.0)(event)
    }

    /// Identity comparison.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Callback {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0))
    }
}

/// One callback per slot in the binding table. Defaults to all no-ops.
#[derive(Debug, Clone, Default)]
pub struct CallbackSet {
    pub enter_frame: Callback,
    pub loop_complete: Callback,
    pub complete: Callback,
    pub segment_start: Callback,
    pub destroy: Callback,
    pub config_ready: Callback,
    pub data_ready: Callback,
    pub dom_loaded: Callback,
    pub error: Callback,
}

impl CallbackSet {
    /// Callback bound to a slot
    pub fn get(&self, kind: EventKind) -> &Callback {
        match kind {
            EventKind::EnterFrame => &self.enter_frame,
            EventKind::LoopComplete => &self.loop_complete,
            EventKind::Complete => &self.complete,
            EventKind::SegmentStart => &self.segment_start,
            EventKind::Destroy => &self.destroy,
            EventKind::ConfigReady => &self.config_ready,
            EventKind::DataReady => &self.data_ready,
            EventKind::DomLoaded => &self.dom_loaded,
            EventKind::Error => &self.error,
        }
    }

    /// Replace the callback bound to a slot
    pub fn set(&mut self, kind: EventKind, callback: Callback) {
        match kind {
            EventKind::EnterFrame => self.enter_frame = callback,
            EventKind::LoopComplete => self.loop_complete = callback,
            EventKind::Complete => self.complete = callback,
            EventKind::SegmentStart => self.segment_start = callback,
            EventKind::Destroy => self.destroy = callback,
            EventKind::ConfigReady => self.config_ready = callback,
            EventKind::DataReady => self.data_ready = callback,
            EventKind::DomLoaded => self.dom_loaded = callback,
            EventKind::Error => self.error = callback,
        }
    }

    /// Slots in binding-table order
    pub fn iter(&self) -> impl Iterator<Item = (EventKind, &Callback)> + '_ {
        EventKind::ALL.iter().map(move |kind| (*kind, self.get(*kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_binding_table_native_names() {
        let names: Vec<&str> = EventKind::ALL.iter().map(|k| k.native_name()).collect();
        assert_eq!(
            names,
            [
                "enterFrame",
                "loopComplete",
                "complete",
                "segmentStart",
                "destroy",
                "config_ready",
                "data_ready",
                "DOMLoaded",
                "error"
            ]
        );
    }

    #[test]
    fn test_native_name_lookup() {
        assert_eq!(EventKind::from_native("DOMLoaded"), Some(EventKind::DomLoaded));
        assert_eq!(EventKind::from_native("config_ready"), Some(EventKind::ConfigReady));
        assert_eq!(EventKind::from_native("mouseover"), None);
    }

    #[test]
    fn test_callback_identity() {
        let a = Callback::new(|_| {});
        let b = Callback::new(|_| {});
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn test_noop_identity_is_shared() {
        assert!(Callback::noop().ptr_eq(&Callback::noop()));
        let defaults = CallbackSet::default();
        let more_defaults = CallbackSet::default();
        for (kind, callback) in defaults.iter() {
            assert!(callback.ptr_eq(more_defaults.get(kind)));
        }
    }

    #[test]
    fn test_callback_invocation() {
        let hits = Rc::new(Cell::new(0u32));
        let seen = hits.clone();
        let callback = Callback::new(move |event| {
            assert_eq!(event.kind, EventKind::Complete);
            seen.set(seen.get() + 1);
        });

        callback.call(&AnimationEvent::new(EventKind::Complete).with_frame(42.0));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_set_replaces_one_slot() {
        let mut set = CallbackSet::default();
        let custom = Callback::new(|_| {});
        set.set(EventKind::Error, custom.clone());

        assert!(set.get(EventKind::Error).ptr_eq(&custom));
        assert!(set.get(EventKind::Complete).ptr_eq(&Callback::noop()));
    }
}
