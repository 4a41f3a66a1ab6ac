//! Property ownership, purchase and rent.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::{Deed, TileIndex};
use crate::core::{GameError, GameState, InsolvencyPolicy, Money, PlayerId, Result};
use crate::events::{EventBus, GameEvent};

/// What happened when a player landed on someone else's tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RentOutcome {
    /// `amount` moved from payer to owner. `shortfall` is the part of the
    /// rent the payer could not cover.
    Paid {
        owner: PlayerId,
        amount: Money,
        shortfall: Money,
    },
    /// The owner is in jail and collects nothing.
    WaivedOwnerJailed { owner: PlayerId },
}

/// Who owns which tile.
///
/// A tile's owner is set once and never cleared. Each player's `owned` set
/// mirrors the entries here.
#[derive(Clone, Debug, Default)]
pub struct PropertyLedger {
    owners: FxHashMap<TileIndex, PlayerId>,
}

impl PropertyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn owner_of(&self, tile: TileIndex) -> Option<PlayerId> {
        self.owners.get(&tile).copied()
    }

    #[must_use]
    pub fn is_owned(&self, tile: TileIndex) -> bool {
        self.owners.contains_key(&tile)
    }

    /// Number of tiles with an owner.
    #[must_use]
    pub fn owned_count(&self) -> usize {
        self.owners.len()
    }

    /// Buy an unowned tile at its listed cost. Returns the price paid.
    pub fn purchase(
        state: &mut GameState,
        buyer: PlayerId,
        tile: TileIndex,
        events: &mut EventBus,
    ) -> Result<Money> {
        let (deed, name) = ownable(state, tile)?;

        if let Some(owner) = state.ledger.owner_of(tile) {
            return Err(GameError::invalid_state(format!("{tile} is already owned by {owner}")));
        }

        let player = state.player_mut(buyer)?;
        if !player.can_afford(deed.cost) {
            return Err(GameError::InsufficientFunds {
                player: buyer,
                cost: deed.cost,
                money: player.money,
            });
        }

        player.money -= deed.cost;
        player.owned.insert(tile);
        state.ledger.owners.insert(tile, buyer);

        events.emit(GameEvent::PropertyPurchased {
            player: buyer,
            tile,
            name,
            cost: deed.cost,
        });
        Ok(deed.cost)
    }

    /// Charge `payer` the rent of a tile owned by another player.
    ///
    /// Both balances change together or not at all.
    pub fn pay_rent(
        state: &mut GameState,
        payer: PlayerId,
        tile: TileIndex,
        events: &mut EventBus,
    ) -> Result<RentOutcome> {
        let (deed, name) = ownable(state, tile)?;
        let owner = state
            .ledger
            .owner_of(tile)
            .ok_or_else(|| GameError::invalid_state(format!("{tile} has no owner to pay")))?;

        state.player(payer)?;
        if owner == payer {
            return Err(GameError::invalid_state(format!("{payer} owns {tile}")));
        }

        if state.player(owner)?.is_jailed() {
            events.emit(GameEvent::RentWaived { payer, owner, tile });
            return Ok(RentOutcome::WaivedOwnerJailed { owner });
        }

        let policy = state.config.insolvency;
        let (from, to) = state
            .players
            .pair_mut(payer, owner)
            .ok_or(GameError::NotFound(owner))?;

        let amount = match policy {
            InsolvencyPolicy::PayWhatYouCan => deed.rent.min(from.money.max(0)),
            InsolvencyPolicy::AllowDebt => deed.rent,
        };
        from.money -= amount;
        to.money += amount;

        let shortfall = deed.rent - amount;
        events.emit(GameEvent::RentPaid {
            payer,
            owner,
            tile,
            name,
            amount,
            shortfall,
        });
        Ok(RentOutcome::Paid {
            owner,
            amount,
            shortfall,
        })
    }
}

/// Deed and name of an ownable tile.
fn ownable(state: &GameState, tile: TileIndex) -> Result<(Deed, String)> {
    let t = state.board.tile_at(tile)?;
    let deed = t
        .deed()
        .copied()
        .ok_or_else(|| GameError::invalid_state(format!("{} is not for sale", t.name)))?;
    Ok((deed, t.name.clone()))
}
