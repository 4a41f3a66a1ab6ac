//! Tile descriptors.

use serde::{Deserialize, Serialize};

use crate::core::Money;

/// Position of a tile on the path (0-based).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileIndex(pub u16);

impl TileIndex {
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Price and rent of an ownable tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deed {
    pub cost: Money,
    pub rent: Money,
}

impl Deed {
    #[must_use]
    pub const fn new(cost: Money, rent: Money) -> Self {
        Self { cost, rent }
    }
}

/// What a tile does when a player lands on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    /// Pays the start-landing bonus and ends the turn.
    Start,
    /// Ownable; landing may earn an extra roll.
    Property(Deed),
    /// Ownable; landing always ends the turn.
    SpecialProperty(Deed),
    Chance,
    Jail,
    GoToJail,
    Empty,
}

impl TileKind {
    /// The deed of an ownable tile.
    #[must_use]
    pub fn deed(&self) -> Option<&Deed> {
        match self {
            TileKind::Property(deed) | TileKind::SpecialProperty(deed) => Some(deed),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_ownable(&self) -> bool {
        self.deed().is_some()
    }

    /// Short label for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            TileKind::Start => "Start",
            TileKind::Property(_) => "Property",
            TileKind::SpecialProperty(_) => "SpecialProperty",
            TileKind::Chance => "Chance",
            TileKind::Jail => "Jail",
            TileKind::GoToJail => "GoToJail",
            TileKind::Empty => "Empty",
        }
    }
}

/// One fixed position on the path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub index: TileIndex,
    pub name: String,
    pub kind: TileKind,
}

impl Tile {
    #[must_use]
    pub fn deed(&self) -> Option<&Deed> {
        self.kind.deed()
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.kind.label())
    }
}
