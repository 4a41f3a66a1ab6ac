//! Game event records.
//!
//! Events are notifications: presentation layers animate `Stepped`,
//! display layers print the `Display` text, and nothing an observer does
//! with an event can change the game.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::TileIndex;
use crate::core::{Money, PlayerId};

/// How a player is travelling along the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Normal movement from a die roll. Eligible for the pass-start bonus.
    Roll,
    /// Forced walk to jail. Never pays the pass-start bonus.
    Relocation,
}

/// Something that happened during play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A player's turn began and they may roll.
    TurnChanged { player: PlayerId },

    DiceRolled {
        player: PlayerId,
        value: u8,
        /// The roll showed the top face.
        max_face: bool,
    },

    /// One tile of movement.
    Stepped {
        player: PlayerId,
        position: TileIndex,
        kind: MoveKind,
    },

    MovementFinished {
        player: PlayerId,
        position: TileIndex,
        kind: MoveKind,
    },

    /// More than one player stands on the tile just reached.
    SharedTile {
        tile: TileIndex,
        players: SmallVec<[PlayerId; 4]>,
    },

    PassedStart {
        player: PlayerId,
        bonus: Money,
        laps: u32,
    },

    LandedOnStart { player: PlayerId, bonus: Money },

    LandedOnEmpty { player: PlayerId, tile: TileIndex },

    /// The buy/pass decision is waiting on the player.
    PurchasePrompted {
        player: PlayerId,
        tile: TileIndex,
        name: String,
        cost: Money,
        rent: Money,
    },

    PurchaseUnaffordable {
        player: PlayerId,
        tile: TileIndex,
        cost: Money,
    },

    PropertyPurchased {
        player: PlayerId,
        tile: TileIndex,
        name: String,
        cost: Money,
    },

    PurchaseDeclined { player: PlayerId, tile: TileIndex },

    /// Landed on a tile the player already owns.
    VisitedOwnTile { player: PlayerId, tile: TileIndex },

    RentPaid {
        payer: PlayerId,
        owner: PlayerId,
        tile: TileIndex,
        name: String,
        amount: Money,
        /// Rent the payer could not cover.
        shortfall: Money,
    },

    RentWaived {
        payer: PlayerId,
        owner: PlayerId,
        tile: TileIndex,
    },

    ChanceLoss {
        player: PlayerId,
        percent: f64,
        amount: Money,
    },

    ChanceGain { player: PlayerId, amount: Money },

    Jailed { player: PlayerId, turns: u8 },

    AlreadyJailed { player: PlayerId, turns_remaining: u8 },

    /// A jailed player's turn was consumed.
    JailTurnServed { player: PlayerId, turns_remaining: u8 },

    ReleasedFromJail { player: PlayerId },

    ExtraRollGranted { player: PlayerId },

    TurnEnded { player: PlayerId },
}

impl GameEvent {
    /// The player the event is about.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        use GameEvent::*;

        match self {
            TurnChanged { player }
            | DiceRolled { player, .. }
            | Stepped { player, .. }
            | MovementFinished { player, .. }
            | PassedStart { player, .. }
            | LandedOnStart { player, .. }
            | LandedOnEmpty { player, .. }
            | PurchasePrompted { player, .. }
            | PurchaseUnaffordable { player, .. }
            | PropertyPurchased { player, .. }
            | PurchaseDeclined { player, .. }
            | VisitedOwnTile { player, .. }
            | ChanceLoss { player, .. }
            | ChanceGain { player, .. }
            | Jailed { player, .. }
            | AlreadyJailed { player, .. }
            | JailTurnServed { player, .. }
            | ReleasedFromJail { player }
            | ExtraRollGranted { player }
            | TurnEnded { player } => Some(*player),
            RentPaid { payer, .. } | RentWaived { payer, .. } => Some(*payer),
            SharedTile { .. } => None,
        }
    }

    /// Per-step movement noise, logged below `info`.
    #[must_use]
    pub fn is_step(&self) -> bool {
        matches!(self, GameEvent::Stepped { .. })
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use GameEvent::*;

        match self {
            TurnChanged { player } => write!(f, "{player}'s turn!"),
            DiceRolled { player, value, max_face } => {
                write!(f, "{player} rolled a {value}")?;
                if *max_face {
                    write!(f, " (top face)")?;
                }
                Ok(())
            }
            Stepped { player, position, .. } => write!(f, "{player} moved to {position}"),
            MovementFinished { player, position, .. } => write!(f, "{player} stopped on {position}"),
            SharedTile { tile, players } => write!(f, "{} players share {tile}", players.len()),
            PassedStart { player, bonus, .. } => write!(f, "{player} passed START. Collected ${bonus}!"),
            LandedOnStart { player, bonus } => {
                write!(f, "{player} landed on START and collected ${bonus}!")
            }
            LandedOnEmpty { player, .. } => write!(f, "{player} landed on an empty tile"),
            PurchasePrompted { player, name, cost, rent, .. } => {
                write!(f, "{player} may buy {name} for ${cost} (rent ${rent})")
            }
            PurchaseUnaffordable { player, tile, cost } => {
                write!(f, "{player} can't afford {tile} (${cost})")
            }
            PropertyPurchased { player, name, cost, .. } => write!(f, "{player} bought {name} for ${cost}"),
            PurchaseDeclined { player, tile } => write!(f, "{player} passed on {tile}"),
            VisitedOwnTile { player, tile } => write!(f, "{player} landed on their own {tile}"),
            RentPaid { payer, owner, name, amount, shortfall, .. } => {
                write!(f, "{payer} paid ${amount} rent to {owner} for {name}")?;
                if *shortfall > 0 {
                    write!(f, " (${shortfall} short)")?;
                }
                Ok(())
            }
            RentWaived { owner, .. } => write!(f, "{owner} is in jail, no rent collected"),
            ChanceLoss { player, percent, amount } => {
                write!(f, "{player} lost ${amount} (Chance card: {:.1}%)", percent * 100.0)
            }
            ChanceGain { player, amount } => {
                write!(f, "{player} gained a bonus of ${amount} from Chance!")
            }
            Jailed { player, turns } => write!(f, "{player} is in jail for {turns} turns"),
            AlreadyJailed { player, turns_remaining } => {
                write!(f, "{player} is already in jail. {turns_remaining} turns remaining")
            }
            JailTurnServed { player, turns_remaining } => {
                write!(f, "{player} is still in jail. Turns remaining: {turns_remaining}")
            }
            ReleasedFromJail { player } => write!(f, "{player} is released from jail"),
            ExtraRollGranted { player } => write!(f, "{player} rolled the top face and rolls again"),
            TurnEnded { player } => write!(f, "{player}'s turn is over"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_lines() {
        let p = PlayerId::new(0);

        assert_eq!(
            GameEvent::PassedStart { player: p, bonus: 200, laps: 1 }.to_string(),
            "Player 0 passed START. Collected $200!"
        );
        assert_eq!(
            GameEvent::ChanceLoss { player: p, percent: 0.2, amount: 200 }.to_string(),
            "Player 0 lost $200 (Chance card: 20.0%)"
        );
        assert_eq!(
            GameEvent::RentPaid {
                payer: p,
                owner: PlayerId::new(1),
                tile: TileIndex::new(7),
                name: "Pine Road".to_string(),
                amount: 30,
                shortfall: 10,
            }
            .to_string(),
            "Player 0 paid $30 rent to Player 1 for Pine Road ($10 short)"
        );
        assert_eq!(
            GameEvent::PropertyPurchased {
                player: p,
                tile: TileIndex::new(16),
                name: "Crown Court".to_string(),
                cost: 220,
            }
            .to_string(),
            "Player 0 bought Crown Court for $220"
        );
    }

    #[test]
    fn test_event_player() {
        let payer = PlayerId::new(1);
        let event = GameEvent::RentWaived {
            payer,
            owner: PlayerId::new(0),
            tile: TileIndex::new(3),
        };
        assert_eq!(event.player(), Some(payer));

        let shared = GameEvent::SharedTile {
            tile: TileIndex::new(7),
            players: SmallVec::from_slice(&[PlayerId::new(0), PlayerId::new(1)]),
        };
        assert_eq!(shared.player(), None);
    }

    #[test]
    fn test_event_serde() {
        let event = GameEvent::Stepped {
            player: PlayerId::new(1),
            position: TileIndex::new(4),
            kind: MoveKind::Relocation,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
