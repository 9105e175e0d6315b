//! Desired playback state a host declares for a view.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ViewError;

/// What the host wants the animation to be doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayState {
    /// Playhead advances
    Playing,
    /// Playhead holds its position
    Paused,
    /// Playhead returns to the start and holds
    Stopped,
}

impl PlayState {
    /// Get the name of this play state
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        }
    }

    /// Check if this state keeps the playhead advancing
    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

impl Default for PlayState {
    fn default() -> Self {
        Self::Playing
    }
}

impl fmt::Display for PlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlayState {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "playing" => Ok(Self::Playing),
            "paused" => Ok(Self::Paused),
            "stopped" => Ok(Self::Stopped),
            other => Err(ViewError::InvalidValue {
                field: "playState".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Playback direction, mapped to the engine's numeric form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    /// Get the name of this direction
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        }
    }

    /// Numeric factor the engine consumes: forward is `1`, reverse is `-1`.
    #[inline]
    pub fn factor(&self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::Forward
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(Self::Forward),
            "reverse" => Ok(Self::Reverse),
            other => Err(ViewError::InvalidValue {
                field: "direction".to_string(),
                value: other.to_string(),
            }),
        }
    }
}
