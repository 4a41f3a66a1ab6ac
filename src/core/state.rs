//! Game state for one session.
//!
//! `GameState` exclusively owns the roster, the board, the property ledger
//! and the RNG streams. The rules components in [`crate::rules`] are
//! stateless and operate on `&mut GameState`, so every mutation made by one
//! of them is complete before any caller can observe the state again.

use smallvec::SmallVec;

use super::config::GameConfig;
use super::error::{GameError, Result};
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::board::{Board, Tile, TileIndex};
use crate::rules::PropertyLedger;

/// Full game state.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Session rules.
    pub config: GameConfig,

    pub board: Board,

    pub players: PlayerMap<Player>,

    /// Tile ownership.
    pub ledger: PropertyLedger,

    /// Whose turn it is.
    pub current: PlayerId,

    /// Set when the active roll showed the top face; cleared when the turn
    /// ends or the extra roll is granted.
    pub extra_roll_pending: bool,

    /// Turn number (starts at 1, incremented on every turn hand-over).
    pub turn_number: u32,

    /// Dice stream.
    pub dice: GameRng,

    /// Chance-card stream.
    pub chance: GameRng,
}

impl GameState {
    /// Create a new game state with every player on the first tile.
    pub fn new(config: GameConfig, board: Board) -> Result<Self> {
        config.validate()?;

        let root = GameRng::new(config.seed);
        let starting_money = config.starting_money;

        Ok(Self {
            players: PlayerMap::new(config.player_count, |id| Player::new(id, starting_money)),
            board,
            ledger: PropertyLedger::new(),
            current: PlayerId::new(0),
            extra_roll_pending: false,
            turn_number: 1,
            dice: root.for_context("dice"),
            chance: root.for_context("chance"),
            config,
        })
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Look up a player by id.
    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players.get(id).ok_or(GameError::NotFound(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players.get_mut(id).ok_or(GameError::NotFound(id))
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// The tile a player is standing on.
    pub fn tile_under(&self, id: PlayerId) -> Result<&Tile> {
        let position = self.player(id)?.position;
        self.board.tile_at(position)
    }

    /// Every player standing on `tile`, in seat order.
    pub fn players_on_tile(&self, tile: TileIndex) -> Result<SmallVec<[PlayerId; 4]>> {
        self.board.tile_at(tile)?;

        Ok(self
            .players
            .iter()
            .filter(|(_, p)| p.position == tile)
            .map(|(id, _)| id)
            .collect())
    }

    /// Total money held by all players.
    #[must_use]
    pub fn total_money(&self) -> i64 {
        self.players.values().map(|p| p.money).sum()
    }
}
