//! The scene sequence: loading, then rounds.

mod game;

pub use game::{Game, Stage};
