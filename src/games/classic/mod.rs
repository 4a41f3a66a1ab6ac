//! The classic board.
//!
//! A 20-tile path:
//! - Start on tile 0, jail on tile 18, go-to-jail on tile 15
//! - Three chance tiles and one empty rest stop
//! - Ordinary properties (extra roll eligible) and special properties
//!   (always end the turn)

mod game;

pub use game::{classic_board, tiles, ClassicGameBuilder, BOARD_LEN};
