//! The round controller.
//!
//! `RoundController` owns the host, the round state, the HUD, and the
//! resource registry. It is driven from outside by three calls:
//!
//! - [`RoundController::pointer_down`] / [`RoundController::pointer_move`]
//!   for input
//! - [`RoundController::tick`] to advance the host animation loop and run the
//!   continuations of whatever completed
//!
//! ## Pick protocol
//!
//! A pointer-down on a live card is admitted only while input is enabled.
//! Admission closes the gate at once, so a second click cannot be processed
//! until the current step reopens it. Picks that arrive while the gate is
//! closed are dropped, never queued.
//!
//! ## Restarts
//!
//! Teardown releases every listener, animation, looped sound, and object the
//! round registered and forgets all pending continuations before anything is
//! rebuilt. Late events for old handles find no continuation and are ignored.

use rustc_hash::FxHashMap;

use super::hud::{Hud, Prompt};
use super::state::{Outcome, RoundPhase, RoundState};
use super::steps::{AfterFlip, Step};
use crate::assets::sounds;
use crate::cards::GridBuilder;
use crate::core::{AdmissionGate, AnimationId, CardId, ConfigError, GameRng, ListenerId, Point, RoundConfig, RoundError};
use crate::host::{AnimationEvent, CameraFade, Cursor, Host, PointerKind, SoundOptions};
use crate::lifecycle::{ResourceRegistry, TeardownReport};

/// Camera shake on a mismatch: duration and intensity.
pub const MISMATCH_SHAKE_MS: u32 = 600;
pub const MISMATCH_SHAKE_INTENSITY: f32 = 0.01;
/// Restart fade length per remaining card.
pub const RESTART_FADE_PER_CARD_MS: u32 = 200;

const SLIDE_VOLUME: f32 = 1.2;
const WHOOSH_VOLUME: f32 = 1.3;
const THEME_VOLUME: f32 = 0.5;

/// What a pointer-down did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerOutcome {
    /// No listener is registered, or the gate is closed.
    Dropped,
    /// Nothing interactive under the pointer.
    Missed,
    VolumeToggled,
    /// The title prompt was clicked; the round starts when it has left.
    TitleDismissed,
    /// A terminal prompt was clicked; a restart follows.
    PromptDismissed,
    /// First pick: the card is turning face-up.
    Revealing(CardId),
    /// The opened card was picked again. Nothing changed.
    Ignored(CardId),
    /// Second pick: the card is turning and will be compared.
    Resolving(CardId),
}

#[derive(Clone, Copy, Debug, Default)]
struct Listeners {
    scene: Option<ListenerId>,
    cards_down: Option<ListenerId>,
    cards_move: Option<ListenerId>,
}

/// Controller for one round at a time, restartable in place.
pub struct RoundController<H: Host> {
    host: H,
    config: RoundConfig,
    rng: GameRng,
    state: RoundState,
    hud: Hud,
    steps: FxHashMap<AnimationId, Step>,
    resources: ResourceRegistry,
    listeners: Listeners,
    entries_pending: usize,
    rounds_started: u32,
}

impl<H: Host> RoundController<H> {
    /// Validate the configuration and show the title screen.
    pub fn new(host: H, config: RoundConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut controller = Self {
            host,
            rng: GameRng::new(config.seed),
            state: RoundState::new(config.initial_lives),
            config,
            hud: Hud::default(),
            steps: FxHashMap::default(),
            resources: ResourceRegistry::new(),
            listeners: Listeners::default(),
            entries_pending: 0,
            rounds_started: 0,
        };
        controller.create();
        Ok(controller)
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Copy of the current state (cheap: the card list is persistent).
    #[must_use]
    pub fn snapshot(&self) -> RoundState {
        self.state.clone()
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.state.phase()
    }

    #[must_use]
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    #[must_use]
    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    /// Continuations waiting for an animation event.
    #[must_use]
    pub fn pending_steps(&self) -> usize {
        self.steps.len()
    }

    /// How many rounds have been dealt by this controller.
    #[must_use]
    pub fn rounds_started(&self) -> u32 {
        self.rounds_started
    }

    // === Driving ===

    /// Advance the host loop by `dt_ms` and run the resulting continuations.
    pub fn tick(&mut self, dt_ms: u32) {
        let events = self.host.advance(dt_ms);
        for event in events {
            self.dispatch(event);
        }
    }

    /// Handle a pointer-down at `point`.
    pub fn pointer_down(&mut self, point: Point) -> PointerOutcome {
        if !self.listening(self.listeners.scene) {
            return PointerOutcome::Dropped;
        }
        if self.hud.volume_hit(&self.host, point) {
            let volume = self.hud.toggle_volume(&mut self.host);
            log::debug!("volume set to {volume}");
            return PointerOutcome::VolumeToggled;
        }

        match self.state.phase() {
            RoundPhase::Title => self.dismiss_prompt(Prompt::Title, point),
            RoundPhase::Won => self.dismiss_prompt(Prompt::Victory, point),
            RoundPhase::Lost => self.dismiss_prompt(Prompt::GameOver, point),
            _ => self.pick(point),
        }
    }

    /// Handle a pointer-move at `point`: hover colours and cursor shape.
    pub fn pointer_move(&mut self, point: Point) {
        if !self.listening(self.listeners.scene) {
            return;
        }

        let prompt = match self.state.phase() {
            RoundPhase::Title => Some(Prompt::Title),
            RoundPhase::Won => Some(Prompt::Victory),
            RoundPhase::Lost => Some(Prompt::GameOver),
            _ => None,
        }
        .filter(|&p| self.hud.prompt_hit(&self.host, p, point));
        self.hud.hover(&mut self.host, prompt);
        if prompt.is_some() {
            self.host.set_cursor(Cursor::Pointer);
            return;
        }

        let over_card = self.listening(self.listeners.cards_move)
            && self.state.input_enabled()
            && self.card_at(point).is_some();
        let cursor = if over_card || self.hud.volume_hit(&self.host, point) {
            Cursor::Pointer
        } else {
            Cursor::Default
        };
        self.host.set_cursor(cursor);
    }

    // === Scene lifecycle ===

    /// Release everything the current round registered.
    ///
    /// Safe to call any number of times; later calls release nothing.
    pub fn teardown(&mut self) -> TeardownReport {
        let report = self.resources.teardown(&mut self.host);
        self.steps.clear();
        self.listeners = Listeners::default();
        self.entries_pending = 0;
        self.hud = Hud::default();
        self.state.set_input(false);
        if !report.is_noop() {
            log::debug!("round torn down: {:?}", report);
        }
        report
    }

    /// Tear down and rebuild from the title screen with a fresh state.
    pub fn restart(&mut self) {
        log::info!("restarting round");
        self.teardown();
        self.rng = self.rng.fork();
        self.state = RoundState::new(self.config.initial_lives);
        self.create();
    }

    fn create(&mut self) {
        self.hud = Hud::create(&mut self.host, &self.config, &mut self.resources);
        let scene = self.host.listen(PointerKind::Down);
        self.resources.track_listener(scene);
        self.listeners.scene = Some(scene);
        self.state.set_phase(RoundPhase::Title);
    }

    fn start_round(&mut self) {
        self.rounds_started += 1;
        log::info!("round {} started", self.rounds_started);

        self.hud.deal_prompts(&mut self.host, &self.config, &mut self.resources);
        self.hud
            .deal_hearts(&mut self.host, &self.config, self.state.lives(), &mut self.resources);

        let deal = GridBuilder::new(&self.config.card_names, self.config.grid).build(
            &mut self.host,
            &mut self.rng,
            &mut self.resources,
        );
        for &entry in &deal.entries {
            self.steps.insert(entry, Step::CardEntry);
        }
        self.entries_pending = deal.entries.len();
        let card_count = deal.cards.len() as u32;
        self.state.set_cards(deal.cards);
        self.state.set_input(false);
        self.state.set_phase(RoundPhase::Idle);

        if let AdmissionGate::FixedDelay { per_card_ms } = self.config.admission {
            let gate = self.host.schedule(per_card_ms.saturating_mul(card_count));
            self.resources.track_animation(gate);
            self.steps.insert(gate, Step::AdmissionGate);
        }

        let down = self.host.listen(PointerKind::Down);
        let moves = self.host.listen(PointerKind::Move);
        self.resources.track_listener(down);
        self.resources.track_listener(moves);
        self.listeners.cards_down = Some(down);
        self.listeners.cards_move = Some(moves);
    }

    fn open_gate(&mut self) {
        if self.state.phase() == RoundPhase::Idle {
            self.state.set_input(true);
            self.state.set_phase(RoundPhase::AwaitingFirstPick);
            log::debug!("input enabled");
        }
    }

    fn begin_restart(&mut self) {
        self.state.clear_opened();
        self.state.set_input(false);
        let delay = RESTART_FADE_PER_CARD_MS.saturating_mul(self.state.cards().len() as u32);
        self.host.fade_camera(CameraFade::Out, delay);
        let timer = self.host.schedule(delay);
        self.resources.track_animation(timer);
        self.steps.insert(timer, Step::Restart);
    }

    // === Picks ===

    fn pick(&mut self, point: Point) -> PointerOutcome {
        if !self.listening(self.listeners.cards_down)
            || !self.state.input_enabled()
            || self.state.cards().is_empty()
        {
            return PointerOutcome::Dropped;
        }
        let Some(card) = self.card_at(point) else {
            return PointerOutcome::Missed;
        };

        self.state.set_input(false);

        match self.state.opened_card().map(|c| (c.id(), c.slot())) {
            Some((opened, slot)) => {
                let same_slot = self.state.card(card).is_some_and(|c| c.slot() == slot);
                if same_slot {
                    self.state.set_input(true);
                    log::debug!("{card} already opened, ignoring");
                    return PointerOutcome::Ignored(card);
                }
                if self.flip(card, AfterFlip::Compare { opened }).is_none() {
                    self.state.set_input(true);
                    return PointerOutcome::Dropped;
                }
                self.state.set_phase(RoundPhase::Resolving);
                log::debug!("second pick {card} against {opened}");
                PointerOutcome::Resolving(card)
            }
            None => {
                if self.state.lives() == 0 || self.flip(card, AfterFlip::Open).is_none() {
                    self.state.set_input(true);
                    return PointerOutcome::Dropped;
                }
                log::debug!("first pick {card}");
                PointerOutcome::Revealing(card)
            }
        }
    }

    fn resolve(&mut self, opened: CardId, picked: CardId) {
        let names = self
            .state
            .card(opened)
            .zip(self.state.card(picked))
            .map(|(a, b)| a.name() == b.name());
        let Some(matched) = names else {
            // One side vanished (teardown race); reopen rather than stall.
            self.state.clear_opened();
            self.state.set_input(true);
            self.state.set_phase(RoundPhase::AwaitingFirstPick);
            return;
        };

        if matched {
            self.host.play(sounds::CARD_MATCH, SoundOptions::default());
            self.remove_pair(&[opened, picked]);
            self.state.clear_opened();
            self.state.set_input(true);
            self.state.set_phase(RoundPhase::AwaitingFirstPick);
            log::debug!("match: {opened} and {picked}");
        } else {
            self.host.play(sounds::CARD_MISMATCH, SoundOptions::default());
            self.host.shake_camera(MISMATCH_SHAKE_MS, MISMATCH_SHAKE_INTENSITY);
            self.spend_life();
            self.flip(picked, AfterFlip::Settle);
            if self.flip(opened, AfterFlip::CloseOpened).is_none() {
                self.close_opened();
            }
            log::debug!("mismatch: {opened} and {picked}, {} lives left", self.state.lives());
        }

        self.check_outcome();
    }

    fn remove_pair(&mut self, ids: &[CardId]) {
        for &id in ids {
            let Some(card) = self.state.card_mut(id) else {
                continue;
            };
            let object = card.object();
            if let Some(exit) = card.destroy(&mut self.host, &mut self.resources) {
                self.steps.insert(exit, Step::CardExit { object });
            }
        }
        self.state.remove_cards(ids);
    }

    fn spend_life(&mut self) {
        if let Some((retract, object)) = self.hud.retract_heart(&mut self.host, &mut self.resources) {
            self.steps.insert(retract, Step::HeartRetract { object });
        }
        self.state.lose_life();
    }

    fn close_opened(&mut self) {
        self.state.clear_opened();
        if !self.state.phase().is_terminal() {
            self.state.set_input(true);
            self.state.set_phase(RoundPhase::AwaitingFirstPick);
        }
    }

    fn check_outcome(&mut self) {
        match self.state.outcome() {
            Some(Outcome::Lost) => {
                self.host.play(sounds::WHOOSH, SoundOptions::volume(WHOOSH_VOLUME));
                self.hud
                    .show(&mut self.host, Prompt::GameOver, &self.config, &mut self.resources);
                self.state.set_input(false);
                self.state.set_phase(RoundPhase::Lost);
                log::info!("round lost with {} cards left", self.state.cards().len());
            }
            Some(Outcome::Won) => {
                self.host.play(sounds::WHOOSH, SoundOptions::volume(WHOOSH_VOLUME));
                self.host.play(sounds::VICTORY, SoundOptions::default());
                self.hud
                    .show(&mut self.host, Prompt::Victory, &self.config, &mut self.resources);
                self.state.set_input(false);
                self.state.set_phase(RoundPhase::Won);
                log::info!("round won with {} lives left", self.state.lives());
            }
            None => {}
        }
    }

    fn flip(&mut self, card: CardId, then: AfterFlip) -> Option<AnimationId> {
        let rotation = self
            .state
            .card_mut(card)?
            .flip(&mut self.host, &mut self.resources)?;
        self.steps.insert(rotation, Step::CardFlip { card, then });
        Some(rotation)
    }

    fn card_at(&self, point: Point) -> Option<CardId> {
        self.state
            .cards()
            .iter()
            .find(|c| c.is_alive() && self.host.hit_test(c.object(), point))
            .map(|c| c.id())
    }

    fn listening(&self, listener: Option<ListenerId>) -> bool {
        listener.is_some_and(|id| self.resources.owns_listener(id) && self.host.is_listening(id))
    }

    fn dismiss_prompt(&mut self, prompt: Prompt, point: Point) -> PointerOutcome {
        if !self.hud.prompt_hit(&self.host, prompt, point) {
            return PointerOutcome::Missed;
        }
        let Some(leave) = self.hud.dismiss(&mut self.host, prompt, &mut self.resources) else {
            return PointerOutcome::Dropped;
        };
        if prompt == Prompt::Title {
            self.steps.insert(leave, Step::TitleLeft);
            PointerOutcome::TitleDismissed
        } else {
            self.steps.insert(leave, Step::PromptLeft);
            PointerOutcome::PromptDismissed
        }
    }

    // === Debug shortcuts ===

    /// Clear every remaining pair through the match path and win.
    pub fn force_win(&mut self) -> Result<(), RoundError> {
        self.check_shortcut()?;
        log::warn!("debug shortcut: forcing a win");

        self.host.play(sounds::CARD_MATCH, SoundOptions::default());
        let ids: Vec<CardId> = self.state.cards().iter().map(|c| c.id()).collect();
        self.remove_pair(&ids);
        self.state.clear_opened();
        self.check_outcome();
        Ok(())
    }

    /// Spend every remaining life through the mismatch path and lose.
    pub fn force_lose(&mut self) -> Result<(), RoundError> {
        self.check_shortcut()?;
        log::warn!("debug shortcut: forcing a loss");

        self.host.play(sounds::CARD_MISMATCH, SoundOptions::default());
        self.host.shake_camera(MISMATCH_SHAKE_MS, MISMATCH_SHAKE_INTENSITY);
        while self.state.lives() > 0 {
            self.spend_life();
        }
        self.state.set_input(false);
        if let Some(opened) = self.state.opened() {
            if self.flip(opened, AfterFlip::CloseOpened).is_none() {
                self.state.clear_opened();
            }
        }
        self.check_outcome();
        Ok(())
    }

    fn check_shortcut(&self) -> Result<(), RoundError> {
        if !self.config.debug_shortcuts {
            log::warn!("debug shortcut rejected: disabled");
            return Err(RoundError::ShortcutsDisabled);
        }
        let accepting = matches!(
            self.state.phase(),
            RoundPhase::AwaitingFirstPick | RoundPhase::AwaitingSecondPick
        ) && self.state.input_enabled();
        if !accepting {
            log::warn!("debug shortcut rejected in {:?}", self.state.phase());
            return Err(RoundError::NotAcceptingPicks);
        }
        Ok(())
    }

    // === Event dispatch ===

    fn dispatch(&mut self, event: AnimationEvent) {
        match event {
            AnimationEvent::Started(id) => {
                if self.steps.get(&id) == Some(&Step::CardEntry) {
                    self.host.play(sounds::CARD_SLIDE, SoundOptions::volume(SLIDE_VOLUME));
                }
            }
            AnimationEvent::Updated { id, value } => {
                if let Some(&Step::CardFlip { card, .. }) = self.steps.get(&id) {
                    if let Some(card) = self.state.card_mut(card) {
                        card.apply_rotation(&mut self.host, value);
                    }
                }
            }
            AnimationEvent::Completed(id) => match self.steps.remove(&id) {
                Some(step) => self.complete(id, step),
                None => log::trace!("{id} completed without a continuation"),
            },
        }
    }

    fn complete(&mut self, id: AnimationId, step: Step) {
        match step {
            Step::CardFlip { card, then } => {
                if let Some(c) = self.state.card_mut(card) {
                    c.finish_flip(&mut self.host, id);
                }
                match then {
                    AfterFlip::Settle => {}
                    AfterFlip::Open => {
                        if !self.state.phase().is_terminal() {
                            self.state.set_opened(card);
                            self.state.set_input(true);
                            self.state.set_phase(RoundPhase::AwaitingSecondPick);
                        }
                    }
                    AfterFlip::Compare { opened } => self.resolve(opened, card),
                    AfterFlip::CloseOpened => self.close_opened(),
                }
            }
            Step::CardEntry => {
                self.entries_pending = self.entries_pending.saturating_sub(1);
                if self.entries_pending == 0 && self.config.admission == AdmissionGate::EntrySettled {
                    self.open_gate();
                }
            }
            Step::CardExit { object } | Step::HeartRetract { object } => {
                if self.host.exists(object) {
                    self.host.destroy(object);
                }
            }
            Step::AdmissionGate => self.open_gate(),
            Step::TitleLeft => {
                if !self.host.is_playing(sounds::THEME_SONG) {
                    self.host
                        .play(sounds::THEME_SONG, SoundOptions::volume(THEME_VOLUME).looped());
                }
                self.resources.track_sound(sounds::THEME_SONG);
                self.start_round();
            }
            Step::PromptLeft => self.begin_restart(),
            Step::Restart => self.restart(),
        }
    }
}

impl<H: Host> Drop for RoundController<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
