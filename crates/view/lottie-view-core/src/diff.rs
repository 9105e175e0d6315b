//! Prop diffing: what the handle has been told, and what is still pending.

use hashbrown::HashSet;

use crate::event::{CallbackSet, EventKind};
use crate::playback::{Direction, PlayState};
use crate::props::ViewProps;

/// Snapshot of the prop subset last applied to the handle. The diff baseline
/// for subsequent prop updates, and the source of stale callbacks that must
/// be unregistered before their replacements go in.
#[derive(Debug, Clone)]
pub struct AppliedProps {
    pub play_state: PlayState,
    pub direction: Direction,
    pub speed: f64,
    pub callbacks: CallbackSet,
}

impl AppliedProps {
    /// Capture the applied subset from a full prop set. Cloning callbacks
    /// preserves their identity.
    pub fn capture(props: &ViewProps) -> Self {
        Self {
            play_state: props.play_state,
            direction: props.direction,
            speed: props.speed,
            callbacks: props.callbacks.clone(),
        }
    }
}

/// Dirty flags over the imperative surface.
#[derive(Debug, Clone, Default)]
pub struct PendingChanges {
    pub play_state: bool,
    pub direction: bool,
    pub speed: bool,
    /// Callback slots whose identity changed
    pub callbacks: HashSet<EventKind>,
}

impl PendingChanges {
    /// Everything dirty. Views start here so the first render after attach
    /// applies the full prop set unconditionally.
    pub fn all() -> Self {
        Self {
            play_state: true,
            direction: true,
            speed: true,
            callbacks: EventKind::ALL.iter().copied().collect(),
        }
    }

    /// Nothing dirty
    pub fn none() -> Self {
        Self::default()
    }

    /// Merge in whatever differs between the applied snapshot and `next`.
    /// Flags accumulate across successive prop updates until a render
    /// applies them.
    pub fn diff_against(&mut self, applied: &AppliedProps, next: &ViewProps) {
        if next.play_state != applied.play_state {
            self.play_state = true;
        }
        if next.direction != applied.direction {
            self.direction = true;
        }
        if next.speed != applied.speed {
            self.speed = true;
        }
        for kind in EventKind::ALL {
            if !next.callbacks.get(kind).ptr_eq(applied.callbacks.get(kind)) {
                self.callbacks.insert(kind);
            }
        }
    }

    /// Check whether any work is pending
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.play_state && !self.direction && !self.speed && self.callbacks.is_empty()
    }
}
