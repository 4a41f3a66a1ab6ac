//! Turn phases and transition records.

use serde::{Deserialize, Serialize};

use crate::board::TileIndex;
use crate::core::{Money, PlayerId};
use crate::events::GameEvent;

/// Where a die roll's resolution has got to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Walking under the roll, `remaining` tiles still to go.
    Moving { remaining: usize },
    /// Movement done, tile effect not yet applied.
    Landed,
    /// Walking to jail, `remaining` tiles still to go.
    Relocating { remaining: usize },
}

/// A buy/pass decision waiting on a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPurchase {
    pub player: PlayerId,
    pub tile: TileIndex,
    pub cost: Money,
    /// Die value of the roll that led here.
    pub die: u8,
    /// Special properties always end the turn once decided.
    pub special: bool,
}

/// The buy/pass answer to a [`PendingPurchase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseDecision {
    Buy,
    Pass,
}

/// Turn state machine phase.
///
/// Only `AwaitingRoll` accepts a roll. `AwaitingRoll` and
/// `AwaitingDecision` wait for outside input; the other phases advance
/// one suspension point per [`step`](super::TurnController::step).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingRoll { player: PlayerId },
    Resolving { player: PlayerId, die: u8, stage: Stage },
    AwaitingDecision(PendingPurchase),
    /// The turn is over; play passes on at the next step.
    TurnEnding { player: PlayerId },
}

impl Phase {
    /// The player the phase belongs to.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            Phase::AwaitingRoll { player }
            | Phase::Resolving { player, .. }
            | Phase::TurnEnding { player } => *player,
            Phase::AwaitingDecision(pending) => pending.player,
        }
    }

    /// True when nothing happens until a roll or a decision arrives.
    #[must_use]
    pub fn needs_input(&self) -> bool {
        matches!(self, Phase::AwaitingRoll { .. } | Phase::AwaitingDecision(_))
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Phase::AwaitingRoll { .. } => "AwaitingRoll",
            Phase::Resolving { .. } => "Resolving",
            Phase::AwaitingDecision(_) => "AwaitingDecision",
            Phase::TurnEnding { .. } => "TurnEnding",
        }
    }
}

/// One step of the state machine, as seen from outside.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    /// Events emitted since the previous transition, in order.
    pub events: Vec<GameEvent>,
}
