//! Upstream boundary: the animation engine the adapter drives.
//!
//! The engine is an external collaborator. The adapter only ever issues the
//! calls below; rendering, document parsing and loading stay on the engine's
//! side of the trait.

use crate::config::PlayerConfig;
use crate::error::ViewError;
use crate::event::{Callback, EventKind};

/// One loaded, controllable animation instance.
pub trait AnimationHandle {
    /// Start or resume playback
    fn play(&mut self);

    /// Hold the playhead where it is
    fn pause(&mut self);

    /// Return the playhead to the start and hold
    fn stop(&mut self);

    /// Set the playback direction: `1` forward, `-1` reverse
    fn set_direction(&mut self, direction: i8);

    /// Set the playback speed multiplier
    fn set_speed(&mut self, speed: f64);

    /// Register a callback under a native event slot
    fn add_event_listener(&mut self, kind: EventKind, callback: Callback);

    /// Unregister a callback. Matching is by callback identity; unknown
    /// listeners are ignored.
    fn remove_event_listener(&mut self, kind: EventKind, callback: &Callback);

    /// Release the instance. Called at most once, on detach; best effort,
    /// cannot fail.
    fn destroy(&mut self);
}

/// Factory producing handles from a finished configuration.
pub trait AnimationEngine {
    type Handle: AnimationHandle;

    /// Load an animation into `config.container` and hand back its handle.
    /// Failures after a successful load surface only through the `Error`
    /// event slot, never through this result.
    fn load(&mut self, config: PlayerConfig) -> Result<Self::Handle, ViewError>;
}
