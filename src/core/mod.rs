//! Core types: identifiers, geometry, RNG, configuration, errors.

pub mod ids;
pub mod geometry;
pub mod rng;
pub mod config;
pub mod error;

pub use ids::{AnimationId, CardId, ListenerId, ObjectId};
pub use geometry::{Point, Rect, Size};
pub use rng::GameRng;
pub use config::{AdmissionGate, GridLayout, RoundConfig};
pub use error::{ConfigError, RoundError};
