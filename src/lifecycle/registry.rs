//! Per-round resource registry.

use smallvec::SmallVec;

use crate::core::{AnimationId, ListenerId, ObjectId};
use crate::host::{Animator, AudioHost, Cursor, InputSource, SceneHost};

/// What one teardown pass released.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TeardownReport {
    /// Listeners deregistered from the input source.
    pub listeners_released: usize,
    /// Animations that were still running and got cancelled.
    pub animations_cancelled: usize,
    /// Animations that had already completed or been cancelled elsewhere.
    pub animations_finished: usize,
    /// Looped sounds stopped.
    pub sounds_stopped: usize,
    /// Scene objects that still existed and were destroyed.
    pub objects_destroyed: usize,
}

impl TeardownReport {
    /// True when the pass found nothing left to release.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Ownership ledger for one round.
#[derive(Clone, Debug, Default)]
pub struct ResourceRegistry {
    listeners: SmallVec<[ListenerId; 4]>,
    animations: Vec<AnimationId>,
    sounds: SmallVec<[String; 2]>,
    objects: Vec<ObjectId>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // === Registration ===

    pub fn track_listener(&mut self, id: ListenerId) {
        if !self.listeners.contains(&id) {
            self.listeners.push(id);
        }
    }

    pub fn track_animation(&mut self, id: AnimationId) {
        self.animations.push(id);
    }

    /// Record a looped sound started by the round.
    pub fn track_sound(&mut self, key: &str) {
        if !self.sounds.iter().any(|k| k == key) {
            self.sounds.push(key.to_string());
        }
    }

    pub fn track_object(&mut self, id: ObjectId) {
        self.objects.push(id);
    }

    // === Queries ===

    #[must_use]
    pub fn owns_listener(&self, id: ListenerId) -> bool {
        self.listeners.contains(&id)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Recorded animation handles, including ones that already finished.
    #[must_use]
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
            && self.animations.is_empty()
            && self.sounds.is_empty()
            && self.objects.is_empty()
    }

    // === Release ===

    /// Release everything recorded so far.
    ///
    /// Animations are cancelled only while the host still reports them active.
    /// Objects are destroyed only if they still exist. Calling this again is a
    /// no-op.
    pub fn teardown<H>(&mut self, host: &mut H) -> TeardownReport
    where
        H: SceneHost + Animator + InputSource + AudioHost + ?Sized,
    {
        let mut report = TeardownReport::default();

        for id in self.listeners.drain(..) {
            if host.unlisten(id) {
                report.listeners_released += 1;
            }
        }

        for id in self.animations.drain(..) {
            if host.is_active(id) && host.cancel(id) {
                report.animations_cancelled += 1;
            } else {
                report.animations_finished += 1;
            }
        }

        for key in self.sounds.drain(..) {
            if host.stop(&key) {
                report.sounds_stopped += 1;
            }
        }

        for id in self.objects.drain(..) {
            if host.destroy(id) {
                report.objects_destroyed += 1;
            }
        }

        if !report.is_noop() {
            host.set_cursor(Cursor::Default);
        }

        log::trace!("teardown released {:?}", report);
        report
    }
}
