//! Engine capabilities consumed by the round core.
//!
//! The core never renders, mixes audio, or interpolates values itself. It asks
//! a host for those capabilities through the traits below and reacts to the
//! events the host reports back.
//!
//! ## Traits
//!
//! - [`SceneHost`]: scene objects, properties, hit-testing, cursor, camera
//! - [`Animator`]: tweens, chains, timers, cancellation, event pump
//! - [`InputSource`]: pointer listener registration
//! - [`AudioHost`]: sound effects and global volume
//! - [`AssetCatalog`]: which named assets are resolved
//!
//! [`Host`] bundles all five. [`SimHost`] is a deterministic, headless
//! implementation used by the test suite and by tools that replay rounds.

mod events;
mod sim;
mod tween;

pub use events::{AnimationEvent, CameraFade, Cursor, PointerKind, SoundOptions, SpawnSpec, Visual};
pub use sim::{PlayedSound, SimHost, SimObject};
pub use tween::{Easing, Property, Repeat, Tween, TweenTarget, DEFAULT_DURATION_MS};

use crate::core::{AnimationId, ListenerId, ObjectId, Point};

/// Scene object management.
pub trait SceneHost {
    /// Create a visual object and return its ID.
    fn spawn(&mut self, spec: SpawnSpec) -> ObjectId;

    /// Check whether an object is still alive.
    fn exists(&self, object: ObjectId) -> bool;

    /// Read a numeric property. `None` if the object is gone.
    fn property(&self, object: ObjectId, property: Property) -> Option<f32>;

    /// Write a numeric property. Ignored if the object is gone.
    fn set_property(&mut self, object: ObjectId, property: Property, value: f32);

    /// Swap the texture of a textured object.
    fn set_texture(&mut self, object: ObjectId, texture: &str);

    /// Recolour a text object.
    fn set_text_color(&mut self, object: ObjectId, color: &str);

    /// Remove an object. Returns false if it was already gone.
    fn destroy(&mut self, object: ObjectId) -> bool;

    /// Does `point` lie on the object's visible face?
    fn hit_test(&self, object: ObjectId, point: Point) -> bool;

    fn set_cursor(&mut self, cursor: Cursor);

    fn shake_camera(&mut self, duration_ms: u32, intensity: f32);

    fn fade_camera(&mut self, fade: CameraFade, duration_ms: u32);

    /// Current position of an object.
    fn position(&self, object: ObjectId) -> Option<Point> {
        Some(Point::new(
            self.property(object, Property::X)?,
            self.property(object, Property::Y)?,
        ))
    }
}

/// The host animation loop.
pub trait Animator {
    /// Start a tween.
    fn animate(&mut self, tween: Tween) -> AnimationId;

    /// Run tweens back to back under one handle.
    fn chain(&mut self, tweens: Vec<Tween>) -> AnimationId;

    /// A timer that completes after `delay_ms`.
    fn schedule(&mut self, delay_ms: u32) -> AnimationId;

    /// Stop an animation. Returns false if it had already finished or was
    /// cancelled before.
    fn cancel(&mut self, id: AnimationId) -> bool;

    /// False once an animation completed or was cancelled (disposed).
    fn is_active(&self, id: AnimationId) -> bool;

    /// Advance the loop by `dt_ms` and collect what happened.
    fn advance(&mut self, dt_ms: u32) -> Vec<AnimationEvent>;
}

/// Pointer listener registration.
pub trait InputSource {
    fn listen(&mut self, kind: PointerKind) -> ListenerId;

    /// Returns false if the listener was not registered.
    fn unlisten(&mut self, id: ListenerId) -> bool;

    fn is_listening(&self, id: ListenerId) -> bool;
}

/// Sound playback.
pub trait AudioHost {
    fn play(&mut self, key: &str, options: SoundOptions);

    /// Stop every instance of a sound. Returns false if none was playing.
    fn stop(&mut self, key: &str) -> bool;

    /// Whether a looped instance of the sound is playing.
    fn is_playing(&self, key: &str) -> bool;

    fn volume(&self) -> f32;

    fn set_volume(&mut self, volume: f32);
}

/// Resolved asset lookup. Loading itself happens before the core starts.
pub trait AssetCatalog {
    fn is_loaded(&self, key: &str) -> bool;
}

/// Everything a round needs from its engine.
pub trait Host: SceneHost + Animator + InputSource + AudioHost + AssetCatalog {}

impl<T> Host for T where T: SceneHost + Animator + InputSource + AudioHost + AssetCatalog {}
