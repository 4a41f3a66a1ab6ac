//! The classic 20-tile board and a builder for sessions on it.

use crate::board::{Board, BoardBuilder};
use crate::core::{GameConfig, InsolvencyPolicy, Money, Result};
use crate::turn::TurnController;

/// Tiles of the classic board, by position.
pub mod tiles {
    use crate::board::TileIndex;

    pub const START: TileIndex = TileIndex::new(0);
    pub const CROWN_COURT: TileIndex = TileIndex::new(16);
    pub const GO_TO_JAIL: TileIndex = TileIndex::new(15);
    pub const JAIL: TileIndex = TileIndex::new(18);
}

/// Number of tiles on the classic board.
pub const BOARD_LEN: usize = 20;

/// Build the classic board.
///
/// | # | Tile | # | Tile |
/// |---|------|---|------|
/// | 0 | GO | 10 | Harbor Way |
/// | 1 | Old Street | 11 | Power Plant (special) |
/// | 2 | Baker Lane | 12 | Mill Street |
/// | 3 | Chance | 13 | Chance |
/// | 4 | North Station (special) | 14 | East Station (special) |
/// | 5 | Elm Avenue | 15 | Go To Jail |
/// | 6 | Oak Avenue | 16 | Crown Court |
/// | 7 | Pine Road | 17 | Regent Row |
/// | 8 | Chance | 18 | Jail |
/// | 9 | Rest Stop | 19 | Park Lane |
pub fn classic_board() -> Result<Board> {
    BoardBuilder::new()
        .start("GO")
        .property("Old Street", 60, 2)
        .property("Baker Lane", 60, 4)
        .chance("Chance")
        .special_property("North Station", 200, 25)
        .property("Elm Avenue", 100, 6)
        .property("Oak Avenue", 100, 6)
        .property("Pine Road", 120, 8)
        .chance("Chance")
        .empty("Rest Stop")
        .property("Harbor Way", 140, 10)
        .special_property("Power Plant", 150, 12)
        .property("Mill Street", 160, 12)
        .chance("Chance")
        .special_property("East Station", 200, 25)
        .go_to_jail("Go To Jail")
        .property("Crown Court", 220, 18)
        .property("Regent Row", 260, 22)
        .jail("Jail")
        .property("Park Lane", 350, 35)
        .build()
}

/// Builder for a session on the classic board.
#[derive(Clone, Debug)]
pub struct ClassicGameBuilder {
    config: GameConfig,
}

impl Default for ClassicGameBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig::new(2),
        }
    }
}

impl ClassicGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(mut self, count: usize) -> Self {
        assert!((2..=8).contains(&count), "Player count must be 2-8");
        self.config.player_count = count;
        self
    }

    pub fn starting_money(mut self, money: Money) -> Self {
        self.config.starting_money = money;
        self
    }

    pub fn insolvency(mut self, policy: InsolvencyPolicy) -> Self {
        self.config.insolvency = policy;
        self
    }

    pub fn release_grants_roll(mut self, grants: bool) -> Self {
        self.config.release_grants_roll = grants;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the board and start the session.
    pub fn build(self) -> Result<TurnController> {
        TurnController::new(self.config, classic_board()?)
    }
}
