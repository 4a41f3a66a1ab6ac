//! Player identification and per-player records.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. Ids are 0-based and double as the seat
//! index in turn order.
//!
//! ## Player
//!
//! Everything the rules track about one player: balance, position on the
//! path, jail status, owned tiles and lap progress.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access by `PlayerId`.

use im::OrdSet;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::board::TileIndex;

/// Currency units. Signed so that `AllowDebt` games can represent debt.
pub type Money = i64;

/// Player identifier.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use board_turns::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(2).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The seat after this one, wrapping around the table.
    #[must_use]
    pub fn next(self, player_count: usize) -> PlayerId {
        PlayerId(((self.index() + 1) % player_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Whether a player is serving jail time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JailStatus {
    #[default]
    Free,
    /// Own turns still to be skipped before release.
    Jailed { turns_remaining: u8 },
}

/// One player's game record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub money: Money,
    pub position: TileIndex,
    pub jail: JailStatus,
    /// Tiles this player owns. Ownership itself is recorded in the ledger.
    pub owned: OrdSet<TileIndex>,
    /// Set once the first movement has resolved. Passing start before that
    /// never pays out.
    pub has_started: bool,
    pub laps_completed: u32,
}

impl Player {
    /// Create a player on the start tile.
    #[must_use]
    pub fn new(id: PlayerId, money: Money) -> Self {
        Self {
            id,
            money,
            position: TileIndex::new(0),
            jail: JailStatus::Free,
            owned: OrdSet::new(),
            has_started: false,
            laps_completed: 0,
        }
    }

    #[must_use]
    pub fn is_jailed(&self) -> bool {
        matches!(self.jail, JailStatus::Jailed { .. })
    }

    /// Remaining jail turns, 0 when free.
    #[must_use]
    pub fn jail_turns_remaining(&self) -> u8 {
        match self.jail {
            JailStatus::Free => 0,
            JailStatus::Jailed { turns_remaining } => turns_remaining,
        }
    }

    #[must_use]
    pub fn can_afford(&self, amount: Money) -> bool {
        self.money >= amount
    }

    #[must_use]
    pub fn owns(&self, tile: TileIndex) -> bool {
        self.owned.contains(&tile)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use board_turns::core::{PlayerId, PlayerMap};
///
/// let mut money: PlayerMap<i64> = PlayerMap::new(2, |_| 1000);
/// money[PlayerId::new(1)] -= 200;
/// assert_eq!(money[PlayerId::new(1)], 800);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = PlayerId::all(player_count).map(factory).collect();
        Self { data }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a player's data, `None` for an id outside the roster.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Mutable access to two distinct players at once.
    ///
    /// Returns `None` if the ids are equal or either is outside the roster.
    pub fn pair_mut(&mut self, a: PlayerId, b: PlayerId) -> Option<(&mut T, &mut T)> {
        let (i, j) = (a.index(), b.index());
        if i == j || i >= self.data.len() || j >= self.data.len() {
            return None;
        }
        if i < j {
            let (lo, hi) = self.data.split_at_mut(j);
            Some((&mut lo[i], &mut hi[0]))
        } else {
            let (lo, hi) = self.data.split_at_mut(i);
            Some((&mut hi[0], &mut lo[j]))
        }
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
