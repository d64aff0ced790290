//! Tween descriptions handed to the host animation loop.
//!
//! A `Tween` is pure data: which numeric property to move, where to, and how.
//! Interpolation and easing curves belong to the host.

use serde::{Deserialize, Serialize};

use crate::core::ObjectId;

/// Default tween duration when none is given, matching common engine defaults.
pub const DEFAULT_DURATION_MS: u32 = 1000;

/// Animatable numeric property of a scene object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    X,
    Y,
    Scale,
    Alpha,
    /// Rotation around the vertical axis, in degrees.
    RotationY,
}

/// Easing curves the core asks for. The host maps them to its own functions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    ExpoOut,
    ExpoInOut,
    BounceOut,
    BounceInOut,
    ElasticIn,
    /// Step function: 0 until 80% progress, then 1. Used for retro blinking.
    Blink,
}

/// How often a tween replays after finishing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Repeat {
    #[default]
    Never,
    Times(u32),
    Forever,
}

/// What a tween drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TweenTarget {
    /// A property on a scene object. The host writes the value each frame.
    Object(ObjectId),
    /// A free-standing value. The host only reports it through update events.
    Value,
}

/// One tween.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub target: TweenTarget,
    pub property: Property,
    /// Start value. `None` means the property's value when the tween starts.
    pub from: Option<f32>,
    pub to: f32,
    pub duration_ms: u32,
    pub delay_ms: u32,
    pub easing: Easing,
    pub repeat: Repeat,
    /// Play backwards after each forward pass.
    pub yoyo: bool,
}

impl Tween {
    /// Tween an object property towards `to`.
    pub fn object(object: ObjectId, property: Property, to: f32) -> Self {
        Self {
            target: TweenTarget::Object(object),
            property,
            from: None,
            to,
            duration_ms: DEFAULT_DURATION_MS,
            delay_ms: 0,
            easing: Easing::Linear,
            repeat: Repeat::Never,
            yoyo: false,
        }
    }

    /// Tween a free value from `from` to `to`.
    pub fn value(property: Property, from: f32, to: f32) -> Self {
        Self {
            target: TweenTarget::Value,
            from: Some(from),
            ..Self::object(ObjectId::new(0), property, to)
        }
    }

    #[must_use]
    pub fn from(mut self, from: f32) -> Self {
        self.from = Some(from);
        self
    }

    #[must_use]
    pub fn duration(mut self, ms: u32) -> Self {
        self.duration_ms = ms;
        self
    }

    #[must_use]
    pub fn delay(mut self, ms: u32) -> Self {
        self.delay_ms = ms;
        self
    }

    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    #[must_use]
    pub fn yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    /// The object this tween writes to, if any.
    #[must_use]
    pub fn object_target(&self) -> Option<ObjectId> {
        match self.target {
            TweenTarget::Object(id) => Some(id),
            TweenTarget::Value => None,
        }
    }
}
