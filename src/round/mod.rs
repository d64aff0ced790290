//! The round state machine.
//!
//! - [`RoundState`]: lives, live cards, opened card, admission gate, phase
//! - [`RoundController`]: pointer protocol, match resolution, outcomes,
//!   restarts, teardown
//! - [`Hud`]: background, prompts, life indicators, volume icon

mod hud;
mod machine;
mod state;
mod steps;

pub use hud::{Hud, Prompt, FADE_IN_MS, PARKED_Y, VOLUME_ICON_POSITION};
pub use machine::{
    PointerOutcome, RoundController, MISMATCH_SHAKE_INTENSITY, MISMATCH_SHAKE_MS, RESTART_FADE_PER_CARD_MS,
};
pub use state::{Outcome, RoundPhase, RoundState};
pub use steps::{AfterFlip, Step};
