//! Declarative prop surface of a view.

use hashbrown::HashMap;
use serde_json::{Map, Value};

use crate::config::{LoopBehavior, Renderer, SourceKind};
use crate::element::Container;
use crate::event::{Callback, CallbackSet, EventKind};
use crate::playback::{Direction, PlayState};

/// Everything a host declares about one animation view.
///
/// Fields are public: the host owns the prop set and rebuilds or mutates it
/// between renders. The [`ViewProps::data`] / [`ViewProps::path`]
/// constructors keep the discriminant and its payload coherent; the raw
/// fields allow any combination, which attach validates.
#[derive(Debug, Clone)]
pub struct ViewProps {
    /// Which payload field carries the animation
    pub source_kind: SourceKind,
    /// Inline animation document, required when `source_kind` is `Data`
    pub animation_data: Option<Value>,
    /// Document path, required when `source_kind` is `Path`
    pub path: Option<String>,
    /// Externally supplied mount element; the view renders its own when absent
    pub container: Option<Container>,
    pub renderer: Renderer,
    pub looping: LoopBehavior,
    pub autoplay: bool,
    pub name: Option<String>,
    /// Renderer-specific settings forwarded verbatim
    pub renderer_settings: Value,
    pub play_state: PlayState,
    pub direction: Direction,
    /// Playback speed multiplier. Exactly `0.0` is never forwarded.
    pub speed: f64,
    pub callbacks: CallbackSet,
    /// Unrecognized props, forwarded to the container element as attributes
    pub attrs: HashMap<String, String>,
}

impl ViewProps {
    fn base(source_kind: SourceKind) -> Self {
        Self {
            source_kind,
            animation_data: None,
            path: None,
            container: None,
            renderer: Renderer::default(),
            looping: LoopBehavior::default(),
            autoplay: true,
            name: None,
            renderer_settings: Value::Object(Map::new()),
            play_state: PlayState::default(),
            direction: Direction::default(),
            speed: 1.0,
            callbacks: CallbackSet::default(),
            attrs: HashMap::new(),
        }
    }

    /// Props for an inline animation document
    pub fn data(document: Value) -> Self {
        let mut props = Self::base(SourceKind::Data);
        props.animation_data = Some(document);
        props
    }

    /// Props for a path-loaded animation
    pub fn path(path: impl Into<String>) -> Self {
        let mut props = Self::base(SourceKind::Path);
        props.path = Some(path.into());
        props
    }

    /// Mount into a caller-owned container
    #[inline]
    pub fn with_container(mut self, container: Container) -> Self {
        self.container = Some(container);
        self
    }

    /// Select the renderer backend
    #[inline]
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Select the loop behavior
    #[inline]
    pub fn with_looping(mut self, looping: LoopBehavior) -> Self {
        self.looping = looping;
        self
    }

    /// Set whether playback starts on load
    #[inline]
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Name the animation
    #[inline]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Forward renderer-specific settings
    #[inline]
    pub fn with_renderer_settings(mut self, settings: Value) -> Self {
        self.renderer_settings = settings;
        self
    }

    /// Set the desired play state
    #[inline]
    pub fn with_play_state(mut self, play_state: PlayState) -> Self {
        self.play_state = play_state;
        self
    }

    /// Set the playback direction
    #[inline]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the speed multiplier
    #[inline]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Bind a callback to one event slot
    #[inline]
    pub fn with_callback(mut self, kind: EventKind, callback: Callback) -> Self {
        self.callbacks.set(kind, callback);
        self
    }

    /// Add a passthrough attribute
    #[inline]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_match_contract() {
        let props = ViewProps::path("animations/pulse.json");
        assert_eq!(props.renderer, Renderer::Svg);
        assert_eq!(props.looping, LoopBehavior::Flag(false));
        assert!(props.autoplay);
        assert_eq!(props.play_state, PlayState::Playing);
        assert_eq!(props.direction, Direction::Forward);
        assert_eq!(props.speed, 1.0);
        assert_eq!(props.renderer_settings, json!({}));
        assert!(props.container.is_none());
        assert!(props.attrs.is_empty());
    }

    #[test]
    fn test_constructors_keep_discriminant_coherent() {
        let data = ViewProps::data(json!({"layers": []}));
        assert_eq!(data.source_kind, SourceKind::Data);
        assert!(data.animation_data.is_some());
        assert!(data.path.is_none());

        let path = ViewProps::path("a.json");
        assert_eq!(path.source_kind, SourceKind::Path);
        assert!(path.animation_data.is_none());
        assert_eq!(path.path.as_deref(), Some("a.json"));
    }
}
