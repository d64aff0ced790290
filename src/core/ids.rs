//! Opaque identifiers for cards and host-owned resources.
//!
//! The core never interprets these values. Card IDs are allocated by the grid
//! builder; object, animation, and listener IDs are handed out by the host.
//!
//! ```
//! use card_memory::core::{AnimationId, CardId};
//!
//! let card = CardId::new(3);
//! assert_eq!(card.raw(), 3);
//! assert_eq!(format!("{}", AnimationId::new(7)), "Animation(7)");
//! ```

use serde::{Deserialize, Serialize};

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new ID.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw ID value.
            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

opaque_id!(
    /// A card within one round. Unique per round, not per name.
    CardId,
    "Card"
);

opaque_id!(
    /// A visual object living in the host scene.
    ObjectId,
    "Object"
);

opaque_id!(
    /// A tween, tween chain, or timer running in the host animation loop.
    ///
    /// Doubles as the cancellation token for that step.
    AnimationId,
    "Animation"
);

opaque_id!(
    /// A pointer listener registered with the input source.
    ListenerId,
    "Listener"
);
