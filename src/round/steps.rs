//! Continuations attached to animation handles.
//!
//! Every animation whose start, progress, or completion matters to the round
//! is mapped to a `Step`. When the host reports an event for that handle, the
//! controller looks the step up and runs it. Handles without a step are purely
//! decorative.

use crate::core::{CardId, ObjectId};

/// What happens once a card flip completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AfterFlip {
    /// Nothing beyond settling the card.
    Settle,
    /// First pick revealed: the card becomes the opened card.
    Open,
    /// Second pick revealed: compare with the opened card.
    Compare { opened: CardId },
    /// Opened card turned back after a mismatch: clear it and reopen input.
    CloseOpened,
}

/// A continuation keyed by animation handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Card rotation. Updates drive the texture; completion runs `then`.
    CardFlip { card: CardId, then: AfterFlip },
    /// Card sliding into its slot. Start plays the slide sound.
    CardEntry,
    /// Matched card leaving the screen; the object is removed afterwards.
    CardExit { object: ObjectId },
    /// Life indicator leaving the screen; the object is removed afterwards.
    HeartRetract { object: ObjectId },
    /// Fixed-delay admission gate.
    AdmissionGate,
    /// Title prompt left the screen: start the round.
    TitleLeft,
    /// Terminal prompt left the screen: begin the restart fade.
    PromptLeft,
    /// Restart fade finished: rebuild the scene.
    Restart,
}
