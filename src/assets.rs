//! Named assets the round refers to.
//!
//! The core never loads anything; it only uses these keys when asking the host
//! to draw or play. The loading scene checks the manifest against the host's
//! [`AssetCatalog`](crate::host::AssetCatalog) before the first round.

use crate::core::RoundConfig;

/// Texture keys.
pub mod textures {
    pub const BACKGROUND: &str = "background";
    pub const CARD_BACK: &str = "card-back";
    pub const HEART: &str = "heart";
    pub const VOLUME_ON: &str = "volume-icon-on";
    pub const VOLUME_OFF: &str = "volume-icon-off";
}

/// Sound keys.
pub mod sounds {
    pub const THEME_SONG: &str = "theme-song";
    pub const WHOOSH: &str = "whoosh";
    pub const CARD_FLIP: &str = "card-flip";
    pub const CARD_MATCH: &str = "card-match";
    pub const CARD_MISMATCH: &str = "card-mismatch";
    pub const CARD_SLIDE: &str = "card-slide";
    pub const VICTORY: &str = "victory";
}

/// Every asset key a round can touch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetManifest {
    keys: Vec<String>,
}

impl AssetManifest {
    /// Build the manifest for a configuration: fixed UI assets plus one front
    /// texture per card name.
    pub fn for_config(config: &RoundConfig) -> Self {
        let fixed = [
            textures::VOLUME_ON,
            textures::VOLUME_OFF,
            textures::HEART,
            sounds::THEME_SONG,
            sounds::WHOOSH,
            sounds::CARD_FLIP,
            sounds::CARD_MATCH,
            sounds::CARD_MISMATCH,
            sounds::CARD_SLIDE,
            sounds::VICTORY,
            textures::BACKGROUND,
            textures::CARD_BACK,
        ];
        let keys = fixed
            .iter()
            .map(|k| k.to_string())
            .chain(config.card_names.iter().map(|n| n.as_str().to_string()))
            .collect();
        Self { keys }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_includes_card_fronts() {
        let manifest = AssetManifest::for_config(&RoundConfig::default());

        assert_eq!(manifest.len(), 18);
        assert!(manifest.keys().any(|k| k == "card-0"));
        assert!(manifest.keys().any(|k| k == "card-5"));
        assert!(manifest.keys().any(|k| k == sounds::THEME_SONG));
    }
}
