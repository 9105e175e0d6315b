//! Engine-facing configuration, assembled once during attach.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::element::Container;
use crate::error::ViewError;

/// Renderer backend the engine should draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Renderer {
    Svg,
    Canvas,
    Html,
}

impl Renderer {
    /// Get the name of this renderer
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Canvas => "canvas",
            Self::Html => "html",
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::Svg
    }
}

impl fmt::Display for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Renderer {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "svg" => Ok(Self::Svg),
            "canvas" => Ok(Self::Canvas),
            "html" => Ok(Self::Html),
            other => Err(ViewError::InvalidValue {
                field: "renderer".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// How playback repeats once the animation reaches its end.
///
/// Mirrors the engine's `boolean | integer` loop field: `Flag(true)` loops
/// forever, `Flag(false)` plays once, `Count(n)` repeats `n` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoopBehavior {
    Flag(bool),
    Count(u32),
}

impl LoopBehavior {
    /// Check whether any repetition happens at all
    #[inline]
    pub fn is_looping(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Count(count) => *count > 0,
        }
    }
}

impl Default for LoopBehavior {
    fn default() -> Self {
        Self::Flag(false)
    }
}

/// Discriminant selecting which payload field carries the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Inline animation document
    Data,
    /// Path the engine fetches the document from
    Path,
}

impl SourceKind {
    /// Get the name of this source kind
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Path => "path",
        }
    }

    /// Name of the prop field this discriminant requires.
    #[inline]
    pub fn payload_field(&self) -> &'static str {
        match self {
            Self::Data => "animationData",
            Self::Path => "path",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceKind {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data" => Ok(Self::Data),
            "path" => Ok(Self::Path),
            other => Err(ViewError::UnknownSourceKind {
                value: other.to_string(),
            }),
        }
    }
}

/// Resolved animation payload handed to the engine.
///
/// Exactly one variant exists per configuration; which one is decided by the
/// discriminant during [`AnimationSource::resolve`], never by inspecting the
/// payloads themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "animationType", rename_all = "lowercase")]
pub enum AnimationSource {
    #[serde(rename_all = "camelCase")]
    Data { animation_data: Value },
    Path { path: String },
}

impl AnimationSource {
    /// Pick the payload the discriminant names. Whatever the other field
    /// holds is ignored; a missing payload for the selected discriminant is
    /// a fatal mount error.
    pub fn resolve(
        kind: SourceKind,
        data: Option<&Value>,
        path: Option<&str>,
    ) -> Result<Self, ViewError> {
        match kind {
            SourceKind::Data => data
                .cloned()
                .map(|animation_data| Self::Data { animation_data })
                .ok_or_else(|| ViewError::SourceMismatch {
                    kind,
                    missing: kind.payload_field().to_string(),
                }),
            SourceKind::Path => path
                .map(|path| Self::Path {
                    path: path.to_string(),
                })
                .ok_or_else(|| ViewError::SourceMismatch {
                    kind,
                    missing: kind.payload_field().to_string(),
                }),
        }
    }

    /// Discriminant of this payload.
    #[inline]
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Data { .. } => SourceKind::Data,
            Self::Path { .. } => SourceKind::Path,
        }
    }
}

/// Configuration the engine factory consumes. Immutable once built; the
/// view assembles a fresh one on every attach.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Element the engine draws into
    pub container: Container,
    pub renderer: Renderer,
    pub looping: LoopBehavior,
    pub autoplay: bool,
    /// Optional animation name, forwarded verbatim
    pub name: Option<String>,
    /// Renderer-specific settings, forwarded verbatim
    pub renderer_settings: Value,
    pub source: AnimationSource,
}
