//! Headless, deterministic host.
//!
//! `SimHost` implements every host trait in memory. Time only moves when
//! [`Animator::advance`] is called, tweens interpolate linearly whatever easing
//! they ask for, and everything the core does (sounds, shakes, fades, cursor
//! changes) is recorded for inspection.

use rustc_hash::{FxHashMap, FxHashSet};

use super::events::{AnimationEvent, CameraFade, Cursor, PointerKind, SoundOptions, SpawnSpec, Visual};
use super::tween::{Property, Repeat, Tween};
use super::{Animator, AssetCatalog, AudioHost, InputSource, SceneHost};
use crate::core::{AnimationId, ListenerId, ObjectId, Point, Rect, Size};

/// A scene object held by the simulated host.
#[derive(Clone, Debug, PartialEq)]
pub struct SimObject {
    pub visual: Visual,
    pub size: Size,
    pub depth: i32,
    pub name: Option<String>,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub alpha: f32,
    pub rotation_y: f32,
}

impl SimObject {
    fn get(&self, property: Property) -> f32 {
        match property {
            Property::X => self.x,
            Property::Y => self.y,
            Property::Scale => self.scale,
            Property::Alpha => self.alpha,
            Property::RotationY => self.rotation_y,
        }
    }

    fn set(&mut self, property: Property, value: f32) {
        match property {
            Property::X => self.x = value,
            Property::Y => self.y = value,
            Property::Scale => self.scale = value,
            Property::Alpha => self.alpha = value,
            Property::RotationY => self.rotation_y = value,
        }
    }

    /// Texture key, for textured objects.
    #[must_use]
    pub fn texture(&self) -> Option<&str> {
        match &self.visual {
            Visual::Texture(key) => Some(key),
            Visual::Text { .. } => None,
        }
    }

    /// Text colour, for text objects.
    #[must_use]
    pub fn text_color(&self) -> Option<&str> {
        match &self.visual {
            Visual::Text { color, .. } => Some(color),
            Visual::Texture(_) => None,
        }
    }
}

/// One recorded `play` call.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayedSound {
    pub key: String,
    pub options: SoundOptions,
}

#[derive(Debug)]
struct SimAnimation {
    id: AnimationId,
    /// Empty for timers.
    segments: Vec<Tween>,
    timer_delay: u32,
    index: usize,
    elapsed: u32,
    started: bool,
    segment_started: bool,
    from: f32,
    forward: bool,
    repeats_done: u32,
}

enum Step {
    Running,
    Done,
}

/// In-memory host for tests and replays.
#[derive(Debug)]
pub struct SimHost {
    next_id: u32,
    objects: FxHashMap<ObjectId, SimObject>,
    animations: Vec<SimAnimation>,
    listeners: FxHashMap<ListenerId, PointerKind>,
    volume: f32,
    looping: Vec<String>,
    played: Vec<PlayedSound>,
    cursor: Cursor,
    shakes: Vec<(u32, f32)>,
    fades: Vec<(CameraFade, u32)>,
    missing_assets: FxHashSet<String>,
}

impl Default for SimHost {
    fn default() -> Self {
        Self {
            next_id: 1,
            objects: FxHashMap::default(),
            animations: Vec::new(),
            listeners: FxHashMap::default(),
            volume: 1.0,
            looping: Vec::new(),
            played: Vec::new(),
            cursor: Cursor::Default,
            shakes: Vec::new(),
            fades: Vec::new(),
            missing_assets: FxHashSet::default(),
        }
    }
}

impl SimHost {
    /// Create a host with every asset resolved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend an asset failed to load.
    #[must_use]
    pub fn with_missing_asset(mut self, key: impl Into<String>) -> Self {
        self.missing_assets.insert(key.into());
        self
    }

    /// Resolve a previously missing asset.
    pub fn resolve_asset(&mut self, key: &str) {
        self.missing_assets.remove(key);
    }

    fn alloc(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // === Inspection ===

    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&SimObject> {
        self.objects.get(&id)
    }

    /// Find a live object by the name it was spawned with.
    #[must_use]
    pub fn find_named(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .filter(|(_, obj)| obj.name.as_deref() == Some(name))
            .map(|(&id, _)| id)
            .min()
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn active_animation_count(&self) -> usize {
        self.animations.len()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Every `play` call so far, in order.
    #[must_use]
    pub fn sounds_played(&self) -> &[PlayedSound] {
        &self.played
    }

    /// How many times a sound was played.
    #[must_use]
    pub fn play_count(&self, key: &str) -> usize {
        self.played.iter().filter(|s| s.key == key).count()
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn shakes(&self) -> &[(u32, f32)] {
        &self.shakes
    }

    #[must_use]
    pub fn fades(&self) -> &[(CameraFade, u32)] {
        &self.fades
    }

    fn push_animation(&mut self, segments: Vec<Tween>, timer_delay: u32) -> AnimationId {
        let id = AnimationId::new(self.alloc());
        self.animations.push(SimAnimation {
            id,
            segments,
            timer_delay,
            index: 0,
            elapsed: 0,
            started: false,
            segment_started: false,
            from: 0.0,
            forward: true,
            repeats_done: 0,
        });
        id
    }

    fn step(
        anim: &mut SimAnimation,
        objects: &mut FxHashMap<ObjectId, SimObject>,
        dt_ms: u32,
        events: &mut Vec<AnimationEvent>,
    ) -> Step {
        anim.elapsed = anim.elapsed.saturating_add(dt_ms);

        if anim.segments.is_empty() {
            if anim.elapsed >= anim.timer_delay {
                events.push(AnimationEvent::Completed(anim.id));
                return Step::Done;
            }
            return Step::Running;
        }

        let tween = &anim.segments[anim.index];
        if anim.elapsed < tween.delay_ms {
            return Step::Running;
        }

        if !anim.segment_started {
            anim.segment_started = true;
            let target = tween.object_target().and_then(|id| objects.get(&id));
            anim.from = tween
                .from
                .or_else(|| target.map(|obj| obj.get(tween.property)))
                .unwrap_or(0.0);
            if !anim.started {
                anim.started = true;
                events.push(AnimationEvent::Started(anim.id));
            }
        }

        let active = anim.elapsed - tween.delay_ms;
        let t = if tween.duration_ms == 0 {
            1.0
        } else {
            (active as f32 / tween.duration_ms as f32).min(1.0)
        };
        let (a, b) = if anim.forward {
            (anim.from, tween.to)
        } else {
            (tween.to, anim.from)
        };
        let value = a + (b - a) * t;

        if let Some(obj) = tween.object_target().and_then(|id| objects.get_mut(&id)) {
            obj.set(tween.property, value);
        }
        events.push(AnimationEvent::Updated { id: anim.id, value });

        if t < 1.0 {
            return Step::Running;
        }

        let replay = match tween.repeat {
            Repeat::Never => false,
            Repeat::Forever => true,
            Repeat::Times(n) => anim.repeats_done < n,
        };
        if replay {
            anim.repeats_done += 1;
            if tween.yoyo {
                anim.forward = !anim.forward;
            }
            anim.elapsed = tween.delay_ms;
            return Step::Running;
        }

        if anim.index + 1 < anim.segments.len() {
            anim.index += 1;
            anim.elapsed = 0;
            anim.segment_started = false;
            anim.forward = true;
            anim.repeats_done = 0;
            return Step::Running;
        }

        events.push(AnimationEvent::Completed(anim.id));
        Step::Done
    }
}

impl SceneHost for SimHost {
    fn spawn(&mut self, spec: SpawnSpec) -> ObjectId {
        let id = ObjectId::new(self.alloc());
        self.objects.insert(
            id,
            SimObject {
                visual: spec.visual,
                size: spec.size,
                depth: spec.depth,
                name: spec.name,
                x: spec.position.x,
                y: spec.position.y,
                scale: 1.0,
                alpha: 1.0,
                rotation_y: 0.0,
            },
        );
        id
    }

    fn exists(&self, object: ObjectId) -> bool {
        self.objects.contains_key(&object)
    }

    fn property(&self, object: ObjectId, property: Property) -> Option<f32> {
        self.objects.get(&object).map(|obj| obj.get(property))
    }

    fn set_property(&mut self, object: ObjectId, property: Property, value: f32) {
        if let Some(obj) = self.objects.get_mut(&object) {
            obj.set(property, value);
        }
    }

    fn set_texture(&mut self, object: ObjectId, texture: &str) {
        if let Some(obj) = self.objects.get_mut(&object) {
            if let Visual::Texture(key) = &mut obj.visual {
                *key = texture.to_string();
            }
        }
    }

    fn set_text_color(&mut self, object: ObjectId, color: &str) {
        if let Some(obj) = self.objects.get_mut(&object) {
            if let Visual::Text { color: current, .. } = &mut obj.visual {
                *current = color.to_string();
            }
        }
    }

    fn destroy(&mut self, object: ObjectId) -> bool {
        self.objects.remove(&object).is_some()
    }

    fn hit_test(&self, object: ObjectId, point: Point) -> bool {
        self.objects.get(&object).is_some_and(|obj| {
            let size = Size::new(obj.size.width * obj.scale, obj.size.height * obj.scale);
            Rect::centered(Point::new(obj.x, obj.y), size).contains(point)
        })
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn shake_camera(&mut self, duration_ms: u32, intensity: f32) {
        self.shakes.push((duration_ms, intensity));
    }

    fn fade_camera(&mut self, fade: CameraFade, duration_ms: u32) {
        self.fades.push((fade, duration_ms));
    }
}

impl Animator for SimHost {
    fn animate(&mut self, tween: Tween) -> AnimationId {
        self.push_animation(vec![tween], 0)
    }

    fn chain(&mut self, tweens: Vec<Tween>) -> AnimationId {
        if tweens.is_empty() {
            return self.schedule(0);
        }
        self.push_animation(tweens, 0)
    }

    fn schedule(&mut self, delay_ms: u32) -> AnimationId {
        self.push_animation(Vec::new(), delay_ms)
    }

    fn cancel(&mut self, id: AnimationId) -> bool {
        match self.animations.iter().position(|a| a.id == id) {
            Some(pos) => {
                self.animations.remove(pos);
                true
            }
            None => false,
        }
    }

    fn is_active(&self, id: AnimationId) -> bool {
        self.animations.iter().any(|a| a.id == id)
    }

    fn advance(&mut self, dt_ms: u32) -> Vec<AnimationEvent> {
        let mut events = Vec::new();
        let Self {
            animations, objects, ..
        } = self;

        animations.retain_mut(|anim| matches!(Self::step(anim, objects, dt_ms, &mut events), Step::Running));
        events
    }
}

impl InputSource for SimHost {
    fn listen(&mut self, kind: PointerKind) -> ListenerId {
        let id = ListenerId::new(self.alloc());
        self.listeners.insert(id, kind);
        id
    }

    fn unlisten(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    fn is_listening(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(&id)
    }
}

impl AudioHost for SimHost {
    fn play(&mut self, key: &str, options: SoundOptions) {
        if options.looped && !self.looping.iter().any(|k| k == key) {
            self.looping.push(key.to_string());
        }
        self.played.push(PlayedSound {
            key: key.to_string(),
            options,
        });
    }

    fn stop(&mut self, key: &str) -> bool {
        let before = self.looping.len();
        self.looping.retain(|k| k != key);
        before != self.looping.len()
    }

    fn is_playing(&self, key: &str) -> bool {
        self.looping.iter().any(|k| k == key)
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
}

impl AssetCatalog for SimHost {
    fn is_loaded(&self, key: &str) -> bool {
        !self.missing_assets.contains(key)
    }
}
