//! A single tile and its animations.
//!
//! ## Flip geometry
//!
//! A card keeps a logical flip angle: 0° when face-down, 180° when face-up.
//! The scene object is drawn with a rotation of `180 + angle`, and the texture
//! follows that rotation: the front shows while it lies in [0°, 90°] or
//! [270°, 360°), the back otherwise. Flipping therefore swaps the texture at
//! the angular midpoint, not at either end.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::CardName;
use crate::assets::{sounds, textures};
use crate::core::{AnimationId, CardId, ObjectId, Point};
use crate::host::{Animator, AudioHost, Easing, Property, SceneHost, SoundOptions, Tween};
use crate::lifecycle::ResourceRegistry;

pub const FLIP_DURATION_MS: u32 = 500;
pub const EXIT_DURATION_MS: u32 = 500;
/// How far a destroyed card travels upward before it is removed.
pub const EXIT_DISTANCE: f32 = 1000.0;

const FACE_DOWN_ANGLE: f32 = 0.0;
const FACE_UP_ANGLE: f32 = 180.0;

/// Which side of the card is logically up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Face {
    Down,
    Up,
}

/// Face state as observed from outside, including the in-flight case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceState {
    FaceDown,
    FaceUp,
    Flipping,
}

/// One card of the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    name: CardName,
    object: ObjectId,
    /// Grid slot; the position used for same-card detection.
    slot: Point,
    face: Face,
    flipping: bool,
    angle: f32,
    target_angle: f32,
    alive: bool,
    /// Animations started by this card and not yet known to be finished.
    animations: SmallVec<[AnimationId; 4]>,
}

impl Card {
    /// Wrap an already spawned scene object. The card starts face-down.
    pub fn new(id: CardId, name: CardName, object: ObjectId, slot: Point) -> Self {
        Self {
            id,
            name,
            object,
            slot,
            face: Face::Down,
            flipping: false,
            angle: FACE_DOWN_ANGLE,
            target_angle: FACE_DOWN_ANGLE,
            alive: true,
            animations: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &CardName {
        &self.name
    }

    #[must_use]
    pub fn object(&self) -> ObjectId {
        self.object
    }

    #[must_use]
    pub fn slot(&self) -> Point {
        self.slot
    }

    #[must_use]
    pub fn face(&self) -> Face {
        self.face
    }

    #[must_use]
    pub fn face_state(&self) -> FaceState {
        match (self.flipping, self.face) {
            (true, _) => FaceState::Flipping,
            (false, Face::Down) => FaceState::FaceDown,
            (false, Face::Up) => FaceState::FaceUp,
        }
    }

    #[must_use]
    pub fn is_flipping(&self) -> bool {
        self.flipping
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Animation handles this card still owns.
    #[must_use]
    pub fn animations(&self) -> &[AnimationId] {
        &self.animations
    }

    /// Start turning the card over.
    ///
    /// Returns the handle of the rotation animation; its completion is the
    /// moment the flip finishes. Returns `None` when the card is already
    /// flipping or has been destroyed.
    pub fn flip<H>(&mut self, host: &mut H, resources: &mut ResourceRegistry) -> Option<AnimationId>
    where
        H: SceneHost + Animator + AudioHost + ?Sized,
    {
        if self.flipping || !self.alive {
            return None;
        }
        self.flipping = true;
        self.target_angle = if self.angle >= FACE_UP_ANGLE {
            FACE_DOWN_ANGLE
        } else {
            FACE_UP_ANGLE
        };

        host.play(sounds::CARD_FLIP, SoundOptions::default());

        let rotation = host.animate(
            Tween::value(Property::RotationY, self.angle, self.target_angle)
                .duration(FLIP_DURATION_MS)
                .easing(Easing::ExpoOut),
        );
        let pulse = host.chain(vec![
            Tween::object(self.object, Property::Scale, 1.1)
                .duration(200)
                .easing(Easing::ExpoInOut),
            Tween::object(self.object, Property::Scale, 1.0)
                .duration(300)
                .easing(Easing::ExpoInOut),
        ]);

        self.animations.retain(|id| host.is_active(*id));
        for id in [rotation, pulse] {
            self.animations.push(id);
            resources.track_animation(id);
        }
        Some(rotation)
    }

    /// Apply an interpolated flip angle reported by the host.
    pub fn apply_rotation<H>(&mut self, host: &mut H, angle: f32)
    where
        H: SceneHost + ?Sized,
    {
        self.angle = angle;
        if !host.exists(self.object) {
            return;
        }
        let rotation = FACE_UP_ANGLE + angle;
        host.set_property(self.object, Property::RotationY, rotation);
        host.set_texture(self.object, self.texture_for(rotation));
    }

    /// Finish the in-flight flip: settle on the target angle and clear the
    /// guard.
    pub fn finish_flip<H>(&mut self, host: &mut H, rotation: AnimationId)
    where
        H: SceneHost + ?Sized,
    {
        self.apply_rotation(host, self.target_angle);
        self.face = if self.target_angle >= FACE_UP_ANGLE {
            Face::Up
        } else {
            Face::Down
        };
        self.flipping = false;
        self.animations.retain(|id| *id != rotation);
    }

    /// Cancel owned animations and send the card off-screen.
    ///
    /// Returns the exit animation; the caller removes the object when it
    /// completes. A second call, or a call after the object vanished, does
    /// nothing and returns `None`.
    pub fn destroy<H>(&mut self, host: &mut H, resources: &mut ResourceRegistry) -> Option<AnimationId>
    where
        H: SceneHost + Animator + ?Sized,
    {
        if !self.alive {
            return None;
        }
        self.alive = false;
        self.flipping = false;

        for id in self.animations.drain(..) {
            if host.is_active(id) {
                host.cancel(id);
            }
        }

        if !host.exists(self.object) {
            return None;
        }
        let y = host.property(self.object, Property::Y).unwrap_or(self.slot.y);
        let exit = host.animate(
            Tween::object(self.object, Property::Y, y - EXIT_DISTANCE)
                .duration(EXIT_DURATION_MS)
                .easing(Easing::ElasticIn),
        );
        self.animations.push(exit);
        resources.track_animation(exit);
        Some(exit)
    }

    fn texture_for(&self, rotation: f32) -> &str {
        let degrees = (rotation.floor() as i64).rem_euclid(360);
        if (0..=90).contains(&degrees) || (270..=359).contains(&degrees) {
            self.name.as_str()
        } else {
            textures::CARD_BACK
        }
    }
}
