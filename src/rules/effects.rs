//! Tile effects.
//!
//! `TileEffectResolver::resolve` runs once after a movement finishes and
//! hands back a [`TurnDirective`] telling the turn controller what comes
//! next. It never ends a turn itself.

use serde::{Deserialize, Serialize};

use super::jail::JailSubsystem;
use super::ledger::PropertyLedger;
use crate::board::{Deed, TileIndex, TileKind};
use crate::core::{ChanceConfig, GameError, GameRng, GameState, Money, PlayerId, Result};
use crate::events::{EventBus, GameEvent};

/// How the turn continues after a tile effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnDirective {
    /// The turn is over regardless of the roll.
    EndTurn,
    /// Roll again if the top face was rolled and the player is free,
    /// otherwise end the turn.
    ContinueOnMaxRoll,
    /// Wait for the player to buy or pass.
    AwaitPurchase(TileIndex),
    /// Walk `distance` tiles to the jail without pass-start bonuses.
    RelocateToJail { distance: usize },
}

/// One chance card.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ChanceDraw {
    Lose { percent: f64 },
    Gain { percent: f64 },
}

impl ChanceDraw {
    /// Whole units moved for a player holding `money`. Debt counts as zero.
    #[must_use]
    pub fn amount(&self, money: Money) -> Money {
        let percent = match self {
            ChanceDraw::Lose { percent } | ChanceDraw::Gain { percent } => *percent,
        };
        (money.max(0) as f64 * percent).floor() as Money
    }
}

pub struct TileEffectResolver;

impl TileEffectResolver {
    /// Apply the effect of the tile `player` is standing on.
    pub fn resolve(state: &mut GameState, player: PlayerId, events: &mut EventBus) -> Result<TurnDirective> {
        let tile = state.tile_under(player)?;
        let (index, kind) = (tile.index, tile.kind);

        match kind {
            TileKind::Start => {
                let bonus = state.config.start_landing_bonus;
                state.player_mut(player)?.money += bonus;
                events.emit(GameEvent::LandedOnStart { player, bonus });
                Ok(TurnDirective::EndTurn)
            }

            TileKind::Property(deed) => Self::resolve_ownable(state, player, index, deed, false, events),

            TileKind::SpecialProperty(deed) => Self::resolve_ownable(state, player, index, deed, true, events),

            TileKind::Chance => {
                let draw = Self::draw_chance(&mut state.chance, &state.config.chance);
                Self::apply_chance(state, player, draw, events)?;
                Ok(TurnDirective::ContinueOnMaxRoll)
            }

            TileKind::Jail => {
                JailSubsystem::enter(state, player, events)?;
                Ok(TurnDirective::EndTurn)
            }

            TileKind::GoToJail => {
                let distance = state
                    .board
                    .forward_distance(index, state.board.jail_index());
                Ok(TurnDirective::RelocateToJail { distance })
            }

            TileKind::Empty => {
                events.emit(GameEvent::LandedOnEmpty { player, tile: index });
                Ok(TurnDirective::ContinueOnMaxRoll)
            }
        }
    }

    fn resolve_ownable(
        state: &mut GameState,
        player: PlayerId,
        tile: TileIndex,
        deed: Deed,
        special: bool,
        events: &mut EventBus,
    ) -> Result<TurnDirective> {
        let settled = Self::after_ownable(special);

        match state.ledger.owner_of(tile) {
            None => {
                let money = state.player(player)?.money;
                if money < deed.cost {
                    events.emit(GameEvent::PurchaseUnaffordable {
                        player,
                        tile,
                        cost: deed.cost,
                    });
                    // No prompt to answer, so no extra roll either
                    return Ok(TurnDirective::EndTurn);
                }
                let name = state.board.tile_at(tile)?.name.clone();
                events.emit(GameEvent::PurchasePrompted {
                    player,
                    tile,
                    name,
                    cost: deed.cost,
                    rent: deed.rent,
                });
                Ok(TurnDirective::AwaitPurchase(tile))
            }
            Some(owner) if owner == player => {
                events.emit(GameEvent::VisitedOwnTile { player, tile });
                Ok(settled)
            }
            Some(_) => {
                PropertyLedger::pay_rent(state, player, tile, events)?;
                Ok(settled)
            }
        }
    }

    /// How a turn continues once an ownable tile is dealt with, including
    /// after a buy/pass decision. Special properties always end the turn.
    #[must_use]
    pub fn after_ownable(special: bool) -> TurnDirective {
        if special {
            TurnDirective::EndTurn
        } else {
            TurnDirective::ContinueOnMaxRoll
        }
    }

    /// Draw a chance card.
    pub fn draw_chance(rng: &mut GameRng, config: &ChanceConfig) -> ChanceDraw {
        if rng.gen_bool(config.loss_probability) {
            ChanceDraw::Lose {
                percent: rng.gen_fraction(config.loss_min..config.loss_max),
            }
        } else {
            ChanceDraw::Gain {
                percent: config.gain_fraction,
            }
        }
    }

    /// Apply a chance card. Returns the signed change in money.
    pub fn apply_chance(
        state: &mut GameState,
        player: PlayerId,
        draw: ChanceDraw,
        events: &mut EventBus,
    ) -> Result<Money> {
        let p = state.player_mut(player)?;
        let amount = draw.amount(p.money);

        match draw {
            ChanceDraw::Lose { percent } => {
                p.money -= amount;
                events.emit(GameEvent::ChanceLoss {
                    player,
                    percent,
                    amount,
                });
                Ok(-amount)
            }
            ChanceDraw::Gain { .. } => {
                p.money += amount;
                events.emit(GameEvent::ChanceGain { player, amount });
                Ok(amount)
            }
        }
    }

    /// Put a relocated player exactly on the jail tile and lock them up.
    pub fn complete_jail_relocation(
        state: &mut GameState,
        player: PlayerId,
        events: &mut EventBus,
    ) -> Result<()> {
        let jail = state.board.jail_index();
        let p = state.player_mut(player)?;
        if p.position != jail {
            return Err(GameError::invalid_state(format!(
                "{player} stopped on {} on the way to jail {jail}",
                p.position
            )));
        }

        JailSubsystem::enter(state, player, events)?;
        Ok(())
    }
}
