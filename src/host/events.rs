//! Plain data exchanged with the host: spawn requests, sound options,
//! pointer kinds, and animation events.

use serde::{Deserialize, Serialize};

use crate::core::{AnimationId, Point, Size};

/// Progress reports from the host animation loop.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AnimationEvent {
    /// The animation left its delay and began moving.
    Started(AnimationId),
    /// New interpolated value for the animation's current tween.
    Updated { id: AnimationId, value: f32 },
    /// The animation (or timer) finished on its own. Not sent on cancel.
    Completed(AnimationId),
}

impl AnimationEvent {
    /// The animation this event belongs to.
    #[must_use]
    pub fn id(&self) -> AnimationId {
        match *self {
            AnimationEvent::Started(id) | AnimationEvent::Completed(id) => id,
            AnimationEvent::Updated { id, .. } => id,
        }
    }
}

/// Pointer event kinds a listener can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerKind {
    Down,
    Move,
}

/// Mouse cursor shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

/// Camera fade direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraFade {
    In,
    Out,
}

/// What a spawned object displays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Visual {
    Texture(String),
    Text { text: String, color: String },
}

/// Request to create a scene object. Objects are positioned by their centre.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnSpec {
    pub visual: Visual,
    pub position: Point,
    pub size: Size,
    pub depth: i32,
    pub name: Option<String>,
}

impl SpawnSpec {
    pub fn texture(key: impl Into<String>, position: Point, size: Size) -> Self {
        Self {
            visual: Visual::Texture(key.into()),
            position,
            size,
            depth: 0,
            name: None,
        }
    }

    pub fn text(text: impl Into<String>, color: impl Into<String>, position: Point, size: Size) -> Self {
        Self {
            visual: Visual::Text {
                text: text.into(),
                color: color.into(),
            },
            position,
            size,
            depth: 0,
            name: None,
        }
    }

    #[must_use]
    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Playback options for a sound effect.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundOptions {
    pub volume: f32,
    pub looped: bool,
}

impl Default for SoundOptions {
    fn default() -> Self {
        Self {
            volume: 1.0,
            looped: false,
        }
    }
}

impl SoundOptions {
    #[must_use]
    pub fn volume(volume: f32) -> Self {
        Self {
            volume,
            looped: false,
        }
    }

    #[must_use]
    pub fn looped(mut self) -> Self {
        self.looped = true;
        self
    }
}
