//! The adapter component: declarative props in, imperative handle calls out.

use log::{debug, trace};
use uuid::Uuid;

use crate::config::{AnimationSource, PlayerConfig};
use crate::diff::{AppliedProps, PendingChanges};
use crate::element::{Container, ContainerElement};
use crate::engine::{AnimationEngine, AnimationHandle};
use crate::error::ViewError;
use crate::event::EventKind;
use crate::playback::PlayState;
use crate::props::ViewProps;
use crate::schedule::{FollowUp, TaskQueue};
use crate::Result;

/// Lifecycle phase of a view instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed; no handle yet
    Idle,
    /// Attached to a host with a live handle
    Attached,
    /// Detached; any handle has been destroyed
    Detached,
}

/// Declarative view over one imperative animation handle.
///
/// The host drives three hooks: [`render`](LottieView::render) on every
/// pass, [`attach`](LottieView::attach) once after the first render, and
/// [`detach`](LottieView::detach) once at teardown. Between passes it
/// replaces props with [`update_props`](LottieView::update_props); the view
/// issues only the deltas to the handle. A render that runs before the
/// handle exists applies nothing and asks the host, through the follow-up
/// queue, to render again next turn.
pub struct LottieView<E: AnimationEngine> {
    id: String,
    props: ViewProps,
    applied: Option<AppliedProps>,
    pending: PendingChanges,
    handle: Option<E::Handle>,
    owned_container: Option<Container>,
    phase: Phase,
    queue: TaskQueue,
}

impl<E: AnimationEngine> LottieView<E> {
    /// Create a view. Every prop counts as unapplied until the first render
    /// after attach pushes it to the handle.
    pub fn new(props: ViewProps) -> Self {
        Self {
            id: format!("lottie-view-{}", Uuid::new_v4()),
            props,
            applied: None,
            pending: PendingChanges::all(),
            handle: None,
            owned_container: None,
            phase: Phase::Idle,
            queue: TaskQueue::new(),
        }
    }

    /// Instance id, also the id of the self-owned container element
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current lifecycle phase
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current props
    #[inline]
    pub fn props(&self) -> &ViewProps {
        &self.props
    }

    /// Container the view currently renders into, if any
    pub fn container(&self) -> Option<Container> {
        self.props
            .container
            .clone()
            .or_else(|| self.owned_container.clone())
    }

    /// Check whether unapplied changes remain
    #[inline]
    pub fn has_pending_work(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Deferred work for the host's next event-loop turn
    pub fn take_follow_ups(&mut self) -> Vec<FollowUp> {
        self.queue.drain()
    }

    /// Replace the prop set. Dirty flags accumulate against the snapshot of
    /// what the handle last saw; before any snapshot exists the comparison
    /// is skipped entirely, because the constructor state already marks
    /// everything for the first application.
    pub fn update_props(&mut self, props: ViewProps) {
        if let Some(applied) = &self.applied {
            self.pending.diff_against(applied, &props);
        }
        self.props = props;
    }

    /// On-attach hook: build the engine configuration and request the
    /// handle. Runs once per instance; attaching again is an error.
    ///
    /// The applied snapshot is recorded from the current props before the
    /// engine call is issued, so later diffs compare against exactly what
    /// attach saw.
    pub fn attach(&mut self, engine: &mut E) -> Result<()> {
        if self.phase != Phase::Idle {
            return Err(ViewError::AlreadyAttached {
                id: self.id.clone(),
            });
        }

        let container = self.resolve_container()?;
        let source = AnimationSource::resolve(
            self.props.source_kind,
            self.props.animation_data.as_ref(),
            self.props.path.as_deref(),
        )?;
        let config = PlayerConfig {
            container,
            renderer: self.props.renderer,
            looping: self.props.looping,
            autoplay: self.props.autoplay,
            name: self.props.name.clone(),
            renderer_settings: self.props.renderer_settings.clone(),
            source,
        };

        self.applied = Some(AppliedProps::capture(&self.props));
        self.handle = Some(engine.load(config)?);
        self.phase = Phase::Attached;
        debug!(
            "{}: attached ({} renderer, {} source)",
            self.id,
            self.props.renderer,
            self.props.source_kind
        );
        Ok(())
    }

    /// On-every-render hook: refresh the container element and push pending
    /// changes to the handle. Returns the container the host should mount.
    pub fn render(&mut self) -> Container {
        let container = self.ensure_container();
        container.borrow_mut().sync_attributes(&self.props.attrs);

        if self.handle.is_none() {
            // Handle creation lags the first render; come back next turn.
            trace!("{}: render before handle, deferring", self.id);
            self.queue.push(FollowUp::Render);
            return container;
        }

        self.apply_pending();
        container
    }

    /// On-detach hook: destroy the handle if one was ever created. Safe to
    /// call in any phase; a second call is a no-op.
    pub fn detach(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.destroy();
            debug!("{}: detached, handle destroyed", self.id);
        } else {
            trace!("{}: detached with no handle", self.id);
        }
        self.phase = Phase::Detached;
    }

    /// Container resolution order: the self-owned element wins when the
    /// caller supplied none; an explicit container wins otherwise; having
    /// neither is a fatal mount error.
    fn resolve_container(&self) -> Result<Container> {
        match (&self.props.container, &self.owned_container) {
            (None, Some(owned)) => Ok(owned.clone()),
            (Some(external), _) => Ok(external.clone()),
            (None, None) => Err(ViewError::MissingContainer),
        }
    }

    fn ensure_container(&mut self) -> Container {
        if let Some(external) = &self.props.container {
            return external.clone();
        }
        if let Some(owned) = &self.owned_container {
            return owned.clone();
        }
        let owned = Container::new(ContainerElement::new(self.id.clone()));
        self.owned_container = Some(owned.clone());
        owned
    }

    fn apply_pending(&mut self) {
        let handle = match self.handle.as_mut() {
            Some(handle) => handle,
            None => return,
        };

        if self.pending.play_state {
            match self.props.play_state {
                PlayState::Playing => handle.play(),
                PlayState::Paused => handle.pause(),
                PlayState::Stopped => handle.stop(),
            }
            trace!("{}: play state -> {}", self.id, self.props.play_state);
            self.pending.play_state = false;
            if let Some(applied) = self.applied.as_mut() {
                applied.play_state = self.props.play_state;
            }
        }

        if self.pending.direction {
            handle.set_direction(self.props.direction.factor());
            trace!("{}: direction -> {}", self.id, self.props.direction);
            self.pending.direction = false;
            if let Some(applied) = self.applied.as_mut() {
                applied.direction = self.props.direction;
            }
        }

        if self.pending.speed {
            // A zero speed is skipped, not clamped: the flag stays set and
            // the handle keeps its previous rate.
            if self.props.speed != 0.0 {
                handle.set_speed(self.props.speed);
                trace!("{}: speed -> {}", self.id, self.props.speed);
                self.pending.speed = false;
                if let Some(applied) = self.applied.as_mut() {
                    applied.speed = self.props.speed;
                }
            }
        }

        for kind in EventKind::ALL {
            if !self.pending.callbacks.remove(&kind) {
                continue;
            }
            let next = self.props.callbacks.get(kind).clone();
            if let Some(applied) = self.applied.as_mut() {
                let previous = applied.callbacks.get(kind).clone();
                handle.remove_event_listener(kind, &previous);
                applied.callbacks.set(kind, next.clone());
            }
            handle.add_event_listener(kind, next);
        }
    }
}

impl<E: AnimationEngine> Drop for LottieView<E> {
    fn drop(&mut self) {
        // A dropped view releases its handle even if the host never ran the
        // detach hook.
        if let Some(mut handle) = self.handle.take() {
            handle.destroy();
        }
    }
}
