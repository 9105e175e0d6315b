//! Lottie View Core
//!
//! A declarative view adapter over imperative Lottie-style animation
//! handles. The host declares props (play state, direction, speed, event
//! callbacks, passthrough attributes); the view owns a container element
//! and one engine handle, and pushes only the prop deltas to the handle on
//! each render pass. The engine itself — rendering, document parsing,
//! loading — sits behind the [`AnimationEngine`] trait and is not part of
//! this crate.

pub mod config;
pub mod diff;
pub mod element;
pub mod engine;
pub mod error;
pub mod event;
pub mod playback;
pub mod props;
pub mod schedule;
pub mod view;

// Re-exports for consumers (hosts and engine backends)
pub use config::{AnimationSource, LoopBehavior, PlayerConfig, Renderer, SourceKind};
pub use diff::{AppliedProps, PendingChanges};
pub use element::{Container, ContainerElement};
pub use engine::{AnimationEngine, AnimationHandle};
pub use error::ViewError;
pub use event::{AnimationEvent, Callback, CallbackSet, EventKind};
pub use playback::{Direction, PlayState};
pub use props::ViewProps;
pub use schedule::{FollowUp, TaskQueue};
pub use view::{LottieView, Phase};

/// View adapter result type
pub type Result<T> = core::result::Result<T, ViewError>;
