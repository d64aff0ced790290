//! Cards and dealing.
//!
//! - [`CardName`]: matching identity, two cards per name
//! - [`Card`]: one tile with its flip and exit animations
//! - [`GridBuilder`]: shuffles the pool into a positioned grid

mod name;
mod card;
mod grid;

pub use name::CardName;
pub use card::{Card, Face, FaceState, EXIT_DISTANCE, EXIT_DURATION_MS, FLIP_DURATION_MS};
pub use grid::{Deal, GridBuilder, ENTRY_DURATION_MS, ENTRY_STAGGER_MS, OFFSCREEN_Y};
