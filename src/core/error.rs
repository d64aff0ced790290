//! Error types.
//!
//! Gameplay itself never fails: picks that cannot be processed are dropped.
//! Errors only surface from configuration validation and the debug shortcuts.

use crate::cards::CardName;

/// A `RoundConfig` that cannot produce a playable round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The card name pool is empty.
    EmptyPool,
    /// A card name appears more than once in the pool.
    DuplicateName(CardName),
    /// `initial_lives` must be at least 1.
    NoLives,
    /// The grid needs at least one column.
    NoColumns,
    /// Card width and height must be positive.
    InvalidCardSize,
    /// The fixed admission delay does not fit in a `u32` of milliseconds.
    AdmissionDelayOverflow,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptyPool => write!(f, "card name pool is empty"),
            ConfigError::DuplicateName(name) => write!(f, "card name {name} appears more than once"),
            ConfigError::NoLives => write!(f, "initial lives must be at least 1"),
            ConfigError::NoColumns => write!(f, "grid must have at least one column"),
            ConfigError::InvalidCardSize => write!(f, "card width and height must be positive"),
            ConfigError::AdmissionDelayOverflow => write!(f, "admission delay overflows u32 milliseconds"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A guarded round transition that was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundError {
    /// Debug shortcuts are disabled in the configuration.
    ShortcutsDisabled,
    /// The round is not currently accepting picks (title, resolving, or over).
    NotAcceptingPicks,
}

impl std::fmt::Display for RoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundError::ShortcutsDisabled => write!(f, "debug shortcuts are disabled"),
            RoundError::NotAcceptingPicks => write!(f, "round is not accepting picks"),
        }
    }
}

impl std::error::Error for RoundError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ConfigError::DuplicateName(CardName::new("card-1"));
        assert_eq!(err.to_string(), "card name card-1 appears more than once");
        assert_eq!(RoundError::ShortcutsDisabled.to_string(), "debug shortcuts are disabled");
    }
}
