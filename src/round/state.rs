//! Round state.
//!
//! `RoundState` is the single owned value describing one round: the live
//! cards, the opened card, lives, the admission gate, and the phase. Only the
//! round controller mutates it; everything else reads snapshots.
//!
//! The live card list is an `im::Vector`, so taking a snapshot is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::CardId;

/// Where a round is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Title prompt shown, nothing dealt yet.
    Title,
    /// Cards dealt, admission gate still closed.
    Idle,
    AwaitingFirstPick,
    /// One card is opened and waiting for its pair.
    AwaitingSecondPick,
    /// A second pick is being revealed, matched, or flipped back.
    Resolving,
    Won,
    Lost,
}

impl RoundPhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, RoundPhase::Won | RoundPhase::Lost)
    }
}

/// How a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// The state of one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    cards: Vector<Card>,
    opened: Option<CardId>,
    lives: u32,
    initial_lives: u32,
    input_enabled: bool,
    phase: RoundPhase,
}

impl RoundState {
    /// Fresh state for a round that has not been dealt yet.
    #[must_use]
    pub fn new(initial_lives: u32) -> Self {
        Self {
            cards: Vector::new(),
            opened: None,
            lives: initial_lives,
            initial_lives,
            input_enabled: false,
            phase: RoundPhase::Title,
        }
    }

    // === Queries ===

    /// Live cards in deal order.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id() == id)
    }

    #[must_use]
    pub fn opened(&self) -> Option<CardId> {
        self.opened
    }

    #[must_use]
    pub fn opened_card(&self) -> Option<&Card> {
        self.opened.and_then(|id| self.card(id))
    }

    #[must_use]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    #[must_use]
    pub fn initial_lives(&self) -> u32 {
        self.initial_lives
    }

    #[must_use]
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Derived outcome. Loss takes precedence over win.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        if self.phase == RoundPhase::Title {
            return None;
        }
        if self.lives == 0 {
            Some(Outcome::Lost)
        } else if self.cards.is_empty() {
            Some(Outcome::Won)
        } else {
            None
        }
    }

    // === Mutation (controller only) ===

    pub(crate) fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        let index = self.cards.iter().position(|c| c.id() == id)?;
        self.cards.get_mut(index)
    }

    pub(crate) fn set_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards = cards.into_iter().collect();
    }

    /// Remove cards by ID, returning the removed ones.
    pub(crate) fn remove_cards(&mut self, ids: &[CardId]) -> Vec<Card> {
        let mut removed = Vec::with_capacity(ids.len());
        let mut kept = Vector::new();
        for card in self.cards.iter() {
            if ids.contains(&card.id()) {
                removed.push(card.clone());
            } else {
                kept.push_back(card.clone());
            }
        }
        self.cards = kept;
        removed
    }

    pub(crate) fn set_opened(&mut self, id: CardId) {
        self.opened = Some(id);
    }

    pub(crate) fn clear_opened(&mut self) {
        self.opened = None;
    }

    /// Spend one life. Never goes below zero.
    pub(crate) fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub(crate) fn set_input(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    pub(crate) fn set_phase(&mut self, phase: RoundPhase) {
        self.phase = phase;
    }
}
