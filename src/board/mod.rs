//! The board: tile descriptors and the closed path they form.
//!
//! Boards are immutable once built. Ownership of tiles is tracked by the
//! [`PropertyLedger`](crate::rules::PropertyLedger), never on the tiles.

mod layout;
mod tile;

pub use layout::{Board, BoardBuilder};
pub use tile::{Deed, Tile, TileIndex, TileKind};
