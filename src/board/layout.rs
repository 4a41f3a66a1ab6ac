//! The board: an immutable closed path of tiles.

use rustc_hash::FxHashMap;

use super::tile::{Deed, Tile, TileIndex, TileKind};
use crate::core::{GameError, Money, Result};

/// Immutable ordered sequence of tiles forming a closed path.
///
/// Exactly one tile is the designated jail, where `GoToJail` sends players.
#[derive(Clone, Debug)]
pub struct Board {
    tiles: Vec<Tile>,
    jail: TileIndex,
    by_name: FxHashMap<String, TileIndex>,
}

impl Board {
    /// Create a board from tiles in path order.
    ///
    /// Tile indices are reassigned from the tiles' positions in `tiles`.
    pub fn new(tiles: Vec<Tile>, jail: TileIndex) -> Result<Self> {
        if tiles.len() < 2 {
            return Err(GameError::invalid_config("a board needs at least 2 tiles"));
        }
        if tiles.len() > u16::MAX as usize {
            return Err(GameError::invalid_config("board too large"));
        }

        let tiles: Vec<Tile> = tiles
            .into_iter()
            .enumerate()
            .map(|(i, tile)| Tile {
                index: TileIndex::new(i as u16),
                ..tile
            })
            .collect();

        match tiles.get(jail.index()) {
            None => {
                return Err(GameError::invalid_config(format!(
                    "jail {} outside a board of {} tiles",
                    jail,
                    tiles.len()
                )))
            }
            Some(tile) if tile.kind != TileKind::Jail => {
                return Err(GameError::invalid_config(format!(
                    "jail {} is a {} tile",
                    jail,
                    tile.kind.label()
                )))
            }
            Some(_) => {}
        }

        for tile in &tiles {
            if let Some(deed) = tile.deed() {
                if deed.cost < 0 || deed.rent < 0 {
                    return Err(GameError::invalid_config(format!(
                        "{} has a negative cost or rent",
                        tile.name
                    )));
                }
            }
        }

        let mut by_name = FxHashMap::default();
        for tile in &tiles {
            by_name.entry(tile.name.clone()).or_insert(tile.index);
        }

        Ok(Self { tiles, jail, by_name })
    }

    /// Look up a tile.
    pub fn tile_at(&self, index: TileIndex) -> Result<&Tile> {
        self.tiles.get(index.index()).ok_or(GameError::OutOfRange {
            index: index.index(),
            len: self.tiles.len(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn jail_index(&self) -> TileIndex {
        self.jail
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Look up a tile by name.
    ///
    /// Names need not be unique (a board usually has several chance tiles);
    /// the first tile along the path with that name is returned.
    #[must_use]
    pub fn tile_by_name(&self, name: &str) -> Option<&Tile> {
        self.by_name.get(name).and_then(|i| self.tiles.get(i.index()))
    }

    /// The tile one step forward, wrapping at the end of the path.
    #[must_use]
    pub fn next_index(&self, from: TileIndex) -> TileIndex {
        TileIndex::new(((from.index() + 1) % self.tiles.len()) as u16)
    }

    /// Steps needed to walk forward from `from` to `to`.
    #[must_use]
    pub fn forward_distance(&self, from: TileIndex, to: TileIndex) -> usize {
        let len = self.tiles.len();
        (to.index() + len - from.index() % len) % len
    }
}

/// Builds a board tile by tile, in path order.
///
/// ```
/// use board_turns::board::BoardBuilder;
///
/// let board = BoardBuilder::new()
///     .start("GO")
///     .property("Old Street", 60, 2)
///     .chance("Chance")
///     .jail("Jail")
///     .build()
///     .unwrap();
/// assert_eq!(board.len(), 4);
/// assert_eq!(board.jail_index().index(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BoardBuilder {
    tiles: Vec<Tile>,
    jail: Option<TileIndex>,
}

impl BoardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tile of any kind.
    #[must_use]
    pub fn tile(mut self, name: impl Into<String>, kind: TileKind) -> Self {
        let index = TileIndex::new(self.tiles.len() as u16);
        self.tiles.push(Tile {
            index,
            name: name.into(),
            kind,
        });
        self
    }

    #[must_use]
    pub fn start(self, name: impl Into<String>) -> Self {
        self.tile(name, TileKind::Start)
    }

    #[must_use]
    pub fn property(self, name: impl Into<String>, cost: Money, rent: Money) -> Self {
        self.tile(name, TileKind::Property(Deed::new(cost, rent)))
    }

    #[must_use]
    pub fn special_property(self, name: impl Into<String>, cost: Money, rent: Money) -> Self {
        self.tile(name, TileKind::SpecialProperty(Deed::new(cost, rent)))
    }

    #[must_use]
    pub fn chance(self, name: impl Into<String>) -> Self {
        self.tile(name, TileKind::Chance)
    }

    #[must_use]
    pub fn empty(self, name: impl Into<String>) -> Self {
        self.tile(name, TileKind::Empty)
    }

    #[must_use]
    pub fn go_to_jail(self, name: impl Into<String>) -> Self {
        self.tile(name, TileKind::GoToJail)
    }

    /// Append a jail tile. The first jail appended is the one `GoToJail`
    /// sends players to.
    #[must_use]
    pub fn jail(mut self, name: impl Into<String>) -> Self {
        if self.jail.is_none() {
            self.jail = Some(TileIndex::new(self.tiles.len() as u16));
        }
        self.tile(name, TileKind::Jail)
    }

    pub fn build(self) -> Result<Board> {
        let jail = self
            .jail
            .ok_or_else(|| GameError::invalid_config("board has no jail tile"))?;
        Board::new(self.tiles, jail)
    }
}
