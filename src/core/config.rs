//! Round configuration.
//!
//! A `RoundConfig` fixes everything about a round that does not change while it
//! is played: the card name pool, the grid layout, the starting lives, and the
//! admission gate policy. Defaults reproduce the shipped game (6 names, 10
//! lives, 4 columns on a 549×480 canvas).
//!
//! Configs deserialize from any serde format; missing fields fall back to the
//! defaults.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::geometry::{Point, Size};
use crate::cards::CardName;

/// Grid placement parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    /// Centre of the top-left card.
    pub origin: Point,
    /// Gap between neighbouring cards.
    pub padding: Size,
    /// Size of one card.
    pub card_size: Size,
    /// Cards per row.
    pub columns: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            origin: Point::new(113.0, 102.0),
            padding: Size::new(10.0, 10.0),
            card_size: Size::new(98.0, 128.0),
            columns: 4,
        }
    }
}

impl GridLayout {
    /// Scene position of the slot at `index` (row-major).
    #[must_use]
    pub fn slot(&self, index: usize) -> Point {
        let columns = self.columns.max(1) as usize;
        let column = (index % columns) as f32;
        let row = (index / columns) as f32;
        Point::new(
            self.origin.x + (self.card_size.width + self.padding.width) * column,
            self.origin.y + (self.card_size.height + self.padding.height) * row,
        )
    }
}

/// When the round starts accepting picks after the deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdmissionGate {
    /// Open after `per_card_ms * card_count` milliseconds, whatever the
    /// entry animations are doing.
    FixedDelay { per_card_ms: u32 },
    /// Open once every card's entry slide has completed.
    EntrySettled,
}

impl Default for AdmissionGate {
    fn default() -> Self {
        AdmissionGate::FixedDelay { per_card_ms: 200 }
    }
}

/// Complete round configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Distinct card names; each appears twice in a round.
    pub card_names: Vec<CardName>,

    /// Lives at round start.
    pub initial_lives: u32,

    /// Canvas size, used to centre prompts and park life indicators.
    pub canvas: Size,

    /// Grid placement.
    pub grid: GridLayout,

    /// Admission gate policy after the deal.
    pub admission: AdmissionGate,

    /// Seed for the grid shuffle. Restarts fork from it.
    pub seed: u64,

    /// Enables `force_win` / `force_lose`.
    pub debug_shortcuts: bool,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            card_names: (0..6).map(|i| CardName::new(format!("card-{i}"))).collect(),
            initial_lives: 10,
            canvas: Size::new(549.0, 480.0),
            grid: GridLayout::default(),
            admission: AdmissionGate::default(),
            seed: 0,
            debug_shortcuts: false,
        }
    }
}

impl RoundConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the card name pool.
    #[must_use]
    pub fn with_card_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.card_names = names.into_iter().map(CardName::new).collect();
        self
    }

    /// Set the starting lives.
    #[must_use]
    pub fn with_lives(mut self, lives: u32) -> Self {
        self.initial_lives = lives;
        self
    }

    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the admission gate policy.
    #[must_use]
    pub fn with_admission(mut self, gate: AdmissionGate) -> Self {
        self.admission = gate;
        self
    }

    /// Enable the debug win/lose shortcuts.
    #[must_use]
    pub fn with_debug_shortcuts(mut self) -> Self {
        self.debug_shortcuts = true;
        self
    }

    /// Number of cards dealt per round.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.card_names.len() * 2
    }

    /// Check that the configuration can produce a playable round.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.card_names.is_empty() {
            return Err(ConfigError::EmptyPool);
        }
        for (i, name) in self.card_names.iter().enumerate() {
            if self.card_names[..i].contains(name) {
                return Err(ConfigError::DuplicateName(name.clone()));
            }
        }
        if self.initial_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.grid.columns == 0 {
            return Err(ConfigError::NoColumns);
        }
        if self.grid.card_size.width <= 0.0 || self.grid.card_size.height <= 0.0 {
            return Err(ConfigError::InvalidCardSize);
        }
        if let AdmissionGate::FixedDelay { per_card_ms } = self.admission {
            let fits = u32::try_from(self.card_count())
                .ok()
                .and_then(|count| per_card_ms.checked_mul(count))
                .is_some();
            if !fits {
                return Err(ConfigError::AdmissionDelayOverflow);
            }
        }
        Ok(())
    }
}
