//! Dealing the round's cards.
//!
//! The builder duplicates the name pool, shuffles it with the round's RNG, and
//! assigns row-major grid slots. Building spawns each card face-down above the
//! canvas and schedules a staggered slide into its slot.

use super::{Card, CardName};
use crate::assets::textures;
use crate::core::{AnimationId, CardId, GameRng, GridLayout, Point};
use crate::host::{Animator, Property, SceneHost, SpawnSpec, Tween};
use crate::lifecycle::ResourceRegistry;

/// Where cards wait before sliding in.
pub const OFFSCREEN_Y: f32 = -1000.0;
pub const ENTRY_DURATION_MS: u32 = 800;
/// Extra start delay per card index.
pub const ENTRY_STAGGER_MS: u32 = 100;

/// The dealt cards plus their entry slides (same order).
#[derive(Debug)]
pub struct Deal {
    pub cards: Vec<Card>,
    pub entries: Vec<AnimationId>,
}

/// Produces a round's card set from a name pool.
#[derive(Clone, Debug)]
pub struct GridBuilder<'a> {
    names: &'a [CardName],
    layout: GridLayout,
}

impl<'a> GridBuilder<'a> {
    pub fn new(names: &'a [CardName], layout: GridLayout) -> Self {
        Self { names, layout }
    }

    /// Shuffled names paired with their slots. No host involved.
    pub fn layout(&self, rng: &mut GameRng) -> Vec<(CardName, Point)> {
        let mut names: Vec<CardName> = self.names.iter().chain(self.names.iter()).cloned().collect();
        rng.shuffle(&mut names);

        names
            .into_iter()
            .enumerate()
            .map(|(index, name)| (name, self.layout.slot(index)))
            .collect()
    }

    /// Spawn the cards and start their entry slides.
    pub fn build<H>(&self, host: &mut H, rng: &mut GameRng, resources: &mut ResourceRegistry) -> Deal
    where
        H: SceneHost + Animator + ?Sized,
    {
        let slots = self.layout(rng);
        let mut cards = Vec::with_capacity(slots.len());
        let mut entries = Vec::with_capacity(slots.len());

        for (index, (name, slot)) in slots.into_iter().enumerate() {
            let spec = SpawnSpec::texture(
                textures::CARD_BACK,
                Point::new(slot.x, OFFSCREEN_Y),
                self.layout.card_size,
            )
            .with_name(name.as_str());
            let object = host.spawn(spec);
            host.set_property(object, Property::RotationY, 180.0);
            resources.track_object(object);

            let entry = host.animate(
                Tween::object(object, Property::Y, slot.y)
                    .duration(ENTRY_DURATION_MS)
                    .delay(index as u32 * ENTRY_STAGGER_MS),
            );
            resources.track_animation(entry);

            cards.push(Card::new(CardId::new(index as u32), name, object, slot));
            entries.push(entry);
        }

        log::debug!("dealt {} cards", cards.len());
        Deal { cards, entries }
    }
}
