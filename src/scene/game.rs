//! Top-level driver.
//!
//! `Game` owns the host and walks the fixed scene sequence: a loading stage
//! that waits until every manifest asset resolves, then the round controller.
//! The engine forwards its frame ticks and pointer events here.

use rustc_hash::FxHashSet;

use crate::assets::AssetManifest;
use crate::core::{ConfigError, Point, RoundConfig};
use crate::host::Host;
use crate::lifecycle::TeardownReport;
use crate::round::{PointerOutcome, RoundController};

/// Which scene is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Loading,
    Playing,
    Stopped,
}

struct Loader<H> {
    host: H,
    manifest: AssetManifest,
    reported: FxHashSet<String>,
    loaded: usize,
}

impl<H: Host> Loader<H> {
    /// Re-check the manifest. Returns true once everything resolved.
    fn poll(&mut self) -> bool {
        let mut loaded = 0;
        for key in self.manifest.keys() {
            if self.host.is_loaded(key) {
                loaded += 1;
            } else if self.reported.insert(key.to_string()) {
                log::warn!("asset not loaded: {key}");
            }
        }
        if loaded != self.loaded {
            self.loaded = loaded;
            log::debug!("loading {}/{}", loaded, self.manifest.len());
        }
        loaded == self.manifest.len()
    }

    fn progress(&self) -> f32 {
        if self.manifest.is_empty() {
            return 1.0;
        }
        self.loaded as f32 / self.manifest.len() as f32
    }
}

enum Scene<H: Host> {
    Loading(Loader<H>),
    Round(RoundController<H>),
}

/// The whole game for one host.
pub struct Game<H: Host> {
    scene: Option<Scene<H>>,
    config: RoundConfig,
    stopped: bool,
}

impl<H: Host> Game<H> {
    /// Validate the configuration and enter the loading stage.
    pub fn new(host: H, config: RoundConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let loader = Loader {
            host,
            manifest: AssetManifest::for_config(&config),
            reported: FxHashSet::default(),
            loaded: 0,
        };
        Ok(Self {
            scene: Some(Scene::Loading(loader)),
            config,
            stopped: false,
        })
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        match (&self.scene, self.stopped) {
            (_, true) | (None, _) => Stage::Stopped,
            (Some(Scene::Loading(_)), false) => Stage::Loading,
            (Some(Scene::Round(_)), false) => Stage::Playing,
        }
    }

    /// Fraction of manifest assets resolved at the last poll.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match &self.scene {
            Some(Scene::Loading(loader)) => loader.progress(),
            _ => 1.0,
        }
    }

    #[must_use]
    pub fn host(&self) -> Option<&H> {
        match self.scene.as_ref()? {
            Scene::Loading(loader) => Some(&loader.host),
            Scene::Round(round) => Some(round.host()),
        }
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        match self.scene.as_mut()? {
            Scene::Loading(loader) => Some(&mut loader.host),
            Scene::Round(round) => Some(round.host_mut()),
        }
    }

    #[must_use]
    pub fn round(&self) -> Option<&RoundController<H>> {
        match &self.scene {
            Some(Scene::Round(round)) => Some(round),
            _ => None,
        }
    }

    pub fn round_mut(&mut self) -> Option<&mut RoundController<H>> {
        match &mut self.scene {
            Some(Scene::Round(round)) if !self.stopped => Some(round),
            _ => None,
        }
    }

    /// One engine frame.
    pub fn tick(&mut self, dt_ms: u32) {
        if self.stopped {
            return;
        }
        match self.scene.take() {
            Some(Scene::Loading(mut loader)) => {
                if !loader.poll() {
                    self.scene = Some(Scene::Loading(loader));
                    return;
                }
                log::info!("all {} assets loaded", loader.manifest.len());
                match RoundController::new(loader.host, self.config.clone()) {
                    Ok(round) => self.scene = Some(Scene::Round(round)),
                    Err(err) => {
                        log::error!("cannot start round: {err}");
                        self.stopped = true;
                    }
                }
            }
            Some(Scene::Round(mut round)) => {
                round.tick(dt_ms);
                self.scene = Some(Scene::Round(round));
            }
            None => {}
        }
    }

    pub fn pointer_down(&mut self, point: Point) -> PointerOutcome {
        match self.round_mut() {
            Some(round) => round.pointer_down(point),
            None => PointerOutcome::Dropped,
        }
    }

    pub fn pointer_move(&mut self, point: Point) {
        if let Some(round) = self.round_mut() {
            round.pointer_move(point);
        }
    }

    /// The engine is destroying the scene: release everything the active
    /// round holds. Later calls release nothing.
    pub fn shutdown(&mut self) -> TeardownReport {
        if self.stopped {
            return TeardownReport::default();
        }
        self.stopped = true;
        log::info!("game shut down");
        match &mut self.scene {
            Some(Scene::Round(round)) => round.teardown(),
            _ => TeardownReport::default(),
        }
    }
}
