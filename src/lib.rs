//! # card-memory
//!
//! A memory-matching card game core. A grid of face-down cards is dealt, the
//! player turns over two at a time, matches leave the board, mismatches cost a
//! life, and the round ends in a win or a loss.
//!
//! ## Design Principles
//!
//! 1. **Headless**: rendering, audio, tween math, and asset loading belong to
//!    the engine. The core talks to it through the traits in [`host`] and
//!    reacts to the animation events it reports.
//!
//! 2. **One owned state**: every round is a single [`RoundState`] value inside
//!    a [`RoundController`]. No statics; controllers are independent.
//!
//! 3. **Explicit continuations**: animation completions map to [`round::Step`]
//!    values keyed by handle, never to captured closures.
//!
//! 4. **Symmetric cleanup**: everything a round registers is released exactly
//!    once by [`ResourceRegistry::teardown`].
//!
//! ## Modules
//!
//! - `core`: IDs, geometry, RNG, configuration, errors
//! - `host`: engine capability traits and the simulated host
//! - `cards`: card flip/exit sequencing and the grid builder
//! - `lifecycle`: per-round resource registry
//! - `round`: round state, HUD, and the controller
//! - `scene`: loading stage and the top-level [`Game`]
//! - `assets`: texture and sound keys, asset manifest

pub mod assets;
pub mod cards;
pub mod core;
pub mod host;
pub mod lifecycle;
pub mod round;
pub mod scene;

// Re-export commonly used types
pub use crate::core::{
    AdmissionGate, AnimationId, CardId, ConfigError, GameRng, GridLayout, ListenerId, ObjectId, Point, RoundConfig,
    RoundError, Size,
};

pub use crate::cards::{Card, CardName, Face, FaceState, GridBuilder};

pub use crate::host::{Host, SimHost};

pub use crate::lifecycle::{ResourceRegistry, TeardownReport};

pub use crate::round::{Outcome, PointerOutcome, RoundController, RoundPhase, RoundState};

pub use crate::scene::{Game, Stage};
